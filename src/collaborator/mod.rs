//! The remote research collaborator.
//!
//! Every "intelligent" step of a cycle is delegated to a language model
//! behind the [`ModelTransport`] seam. [`ResearchCollaborator`] owns the
//! prompts and the strict deserialization of each named operation; it
//! reports malformed output as [`Parsed::Malformed`] and leaves the decision
//! to degrade or abort to the orchestrator.

mod client;
mod corpus;
mod credentials;
mod parse;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{GeminiClient, ModelConfig};
pub use corpus::papers;
pub use credentials::Credentials;
pub use parse::{parse_structured, Parsed};

use crate::models::*;

/// Returned by `synthesize_literature` when the model produced no text.
pub const SYNTHESIS_FAILED: &str = "Synthesis failed.";

/// Transport-level collaborator errors.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key missing or invalid ({0})")]
    Unauthorized(String),

    #[error("Model API error {status}: {body}")]
    Api { status: u16, body: String },
}

impl CollaboratorError {
    /// Whether the failure means the credential must be (re)selected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// The named collaborator operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    DiscoverTopics,
    SynthesizeLiterature,
    GenerateHypotheses,
    GenerateSimulationTelemetry,
    GenerateVisual,
    RunCodeLab,
    VerifyHypothesis,
    PublishJournal,
    UpdateKnowledgeState,
    RunMetaAnalysis,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiscoverTopics => "discoverTopics",
            Self::SynthesizeLiterature => "synthesizeLiterature",
            Self::GenerateHypotheses => "generateHypotheses",
            Self::GenerateSimulationTelemetry => "generateSimulationTelemetry",
            Self::GenerateVisual => "generateVisual",
            Self::RunCodeLab => "runCodeLab",
            Self::VerifyHypothesis => "verifyHypothesis",
            Self::PublishJournal => "publishJournal",
            Self::UpdateKnowledgeState => "updateKnowledgeState",
            Self::RunMetaAnalysis => "runMetaAnalysis",
        }
    }
}

/// Which class of model serves an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Flash,
    Pro,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Text,
    /// The response is an image, returned as a `data:` URL.
    Image,
}

/// One request/response exchange with the model.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub operation: Operation,
    pub tier: ModelTier,
    pub format: ResponseFormat,
    pub prompt: String,
}

/// The network seam: sends a prompt, returns the model's raw text.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn generate(&self, request: &ModelRequest) -> Result<String, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    Plasma,
    Fuel,
    Fusion,
}

/// What knowledge integration gets back from the model.
///
/// Only the subsystems are mandatory; the orchestrator owns counters and
/// report history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeUpdate {
    pub subsystems: Subsystems,
    #[serde(default)]
    pub master_design_doc: Option<String>,
    #[serde(default)]
    pub breakthroughs: Vec<Breakthrough>,
    #[serde(default)]
    pub simulation_telemetry: Option<SimulationTelemetry>,
}

type OpResult<T> = Result<Parsed<T>, CollaboratorError>;

/// The named research operations, expressed over a [`ModelTransport`].
#[derive(Clone)]
pub struct ResearchCollaborator {
    transport: Arc<dyn ModelTransport>,
}

impl ResearchCollaborator {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    async fn call(
        &self,
        operation: Operation,
        tier: ModelTier,
        format: ResponseFormat,
        prompt: String,
    ) -> Result<String, CollaboratorError> {
        self.transport
            .generate(&ModelRequest {
                operation,
                tier,
                format,
                prompt,
            })
            .await
    }

    async fn structured<T: serde::de::DeserializeOwned>(
        &self,
        operation: Operation,
        tier: ModelTier,
        prompt: String,
    ) -> OpResult<T> {
        let raw = self
            .call(operation, tier, ResponseFormat::Json, prompt)
            .await?;
        let parsed = parse_structured(&raw);
        if let Parsed::Malformed { reason } = &parsed {
            tracing::warn!(operation = operation.as_str(), "Malformed model response: {}", reason);
        }
        Ok(parsed)
    }

    pub async fn discover_topics(
        &self,
        knowledge: &RocketKnowledgeState,
        target: SubsystemKey,
    ) -> OpResult<Vec<ResearchTopic>> {
        let prompt = prompts::discover_topics(knowledge.subsystems.get(target));
        self.structured(Operation::DiscoverTopics, ModelTier::Flash, prompt)
            .await
    }

    /// Free-text synthesis of the corpus. An empty answer becomes
    /// [`SYNTHESIS_FAILED`].
    pub async fn synthesize_literature(&self, papers: &[Paper]) -> Result<String, CollaboratorError> {
        let text = self
            .call(
                Operation::SynthesizeLiterature,
                ModelTier::Flash,
                ResponseFormat::Text,
                prompts::synthesize_literature(papers),
            )
            .await?;
        if text.trim().is_empty() {
            return Ok(SYNTHESIS_FAILED.to_string());
        }
        Ok(text)
    }

    pub async fn generate_hypotheses(
        &self,
        synthesis: &str,
        knowledge: &RocketKnowledgeState,
        lead_topic: Option<&ResearchTopic>,
    ) -> OpResult<Vec<Hypothesis>> {
        let prompt = prompts::generate_hypotheses(synthesis, knowledge, lead_topic);
        self.structured(Operation::GenerateHypotheses, ModelTier::Flash, prompt)
            .await
    }

    pub async fn generate_simulation_telemetry(
        &self,
        hypothesis: &Hypothesis,
    ) -> OpResult<SimulationTelemetry> {
        let prompt = prompts::simulation_telemetry(hypothesis);
        self.structured(Operation::GenerateSimulationTelemetry, ModelTier::Flash, prompt)
            .await
    }

    /// Render a visual as a `data:` URL.
    ///
    /// Visuals are decorative: an empty image or any failure other than a
    /// rejected credential yields `None`.
    pub async fn generate_visual(
        &self,
        description: &str,
        mode: VisualMode,
    ) -> Result<Option<String>, CollaboratorError> {
        let result = self
            .call(
                Operation::GenerateVisual,
                ModelTier::Image,
                ResponseFormat::Image,
                prompts::visual(description, mode),
            )
            .await;
        match result {
            Ok(url) if url.starts_with("data:") => Ok(Some(url)),
            Ok(_) => Ok(None),
            Err(e) if e.is_auth_failure() => Err(e),
            Err(e) => {
                tracing::warn!("Visual generation failed: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn run_code_lab(&self, hypothesis: &Hypothesis) -> OpResult<Vec<CodeVerification>> {
        let prompt = prompts::run_code_lab(hypothesis);
        self.structured(Operation::RunCodeLab, ModelTier::Flash, prompt)
            .await
    }

    pub async fn verify_hypothesis(
        &self,
        hypothesis: &Hypothesis,
        code: &[CodeVerification],
    ) -> OpResult<VerificationSuiteResults> {
        let prompt = prompts::verify_hypothesis(hypothesis, code);
        self.structured(Operation::VerifyHypothesis, ModelTier::Pro, prompt)
            .await
    }

    pub async fn publish_journal(
        &self,
        hypothesis: &Hypothesis,
        verification: &VerificationSuiteResults,
    ) -> OpResult<JournalDraft> {
        let prompt = prompts::publish_journal(hypothesis, verification);
        self.structured(Operation::PublishJournal, ModelTier::Pro, prompt)
            .await
    }

    pub async fn update_knowledge_state(
        &self,
        current: &RocketKnowledgeState,
        report: &ResearchReport,
    ) -> OpResult<KnowledgeUpdate> {
        let prompt = prompts::update_knowledge_state(current, report);
        self.structured(Operation::UpdateKnowledgeState, ModelTier::Pro, prompt)
            .await
    }

    pub async fn run_meta_analysis(
        &self,
        knowledge: &RocketKnowledgeState,
        recent_logs: &[AgentLog],
    ) -> OpResult<BotReport> {
        let prompt = prompts::meta_analysis(knowledge, recent_logs);
        self.structured(Operation::RunMetaAnalysis, ModelTier::Flash, prompt)
            .await
    }
}
