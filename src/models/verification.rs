use serde::{Deserialize, Serialize};

use super::CodeVerification;

/// The structured outcome of the verification audit.
///
/// Embedded in a [`ResearchReport`](super::ResearchReport); never persisted
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSuiteResults {
    pub physics_review: ReviewerVerdict,
    pub material_review: ReviewerVerdict,
    pub engineering_review: ReviewerVerdict,
    pub manufacturing_review: ReviewerVerdict,
    /// Attached by the orchestrator from the code-lab stage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_lab_results: Vec<CodeVerification>,
    /// 0.0 - 1.0
    pub overall_confidence: f64,
    /// 1 - 100
    pub practicality_score: f64,
    /// Technology Readiness Level, 1 - 9
    pub readiness_level: u8,
}

impl VerificationSuiteResults {
    pub fn reviews(&self) -> [&ReviewerVerdict; 4] {
        [
            &self.physics_review,
            &self.material_review,
            &self.engineering_review,
            &self.manufacturing_review,
        ]
    }
}

/// One reviewer's verdict within the suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerVerdict {
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub role: String,
    pub verdict: Verdict,
    #[serde(default)]
    pub rationale: String,
    /// 1 - 10
    pub feasibility_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practicality_bottleneck: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Validated,
    Skeptical,
    Flawed,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "VALIDATED",
            Self::Skeptical => "SKEPTICAL",
            Self::Flawed => "FLAWED",
        }
    }
}
