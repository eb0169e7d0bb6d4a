//! MAIRIS PRIME: an autonomous rocket-engine research lab.
//!
//! A [`orchestrator::Orchestrator`] drives research cycles against a remote
//! language model ([`collaborator`]) and folds each published report into a
//! persisted knowledge state ([`store`]). The lab is exposed over HTTP
//! ([`api`]), MCP ([`mcp`]) and the `mairis` CLI.

pub mod api;
pub mod collaborator;
pub mod db;
pub mod export;
pub mod mcp;
pub mod models;
pub mod orchestrator;
pub mod store;
