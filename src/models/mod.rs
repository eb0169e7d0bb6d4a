//! Domain models for the MAIRIS PRIME research lab.
//!
//! # Core Concepts
//!
//! ## Durable
//!
//! - [`RocketKnowledgeState`]: The root aggregate, persisted as one JSON document.
//! - [`EngineSubsystem`]: Readiness of one of the five fixed engine subsystems.
//! - [`ResearchReport`]: The immutable output of a completed cycle, kept in
//!   `past_reports` (most recent first, capped).
//! - [`Breakthrough`]: A high-impact outcome recorded during knowledge integration.
//!
//! ## Transient
//!
//! These exist only while a cycle runs or for live display:
//!
//! - [`ResearchTopic`], [`Hypothesis`], [`CodeVerification`]: Intermediate
//!   pipeline products.
//! - [`VerificationSuiteResults`]: Embedded in the report that published it.
//! - [`AgentLog`]: The in-memory activity log.
//! - [`ResearchStage`]: The cycle's current position.

mod knowledge;
mod log;
mod observatory;
mod report;
mod research;
mod stage;
mod subsystem;
mod verification;

pub use knowledge::*;
pub use log::*;
pub use observatory::*;
pub use report::*;
pub use research::*;
pub use stage::*;
pub use subsystem::*;
pub use verification::*;
