use serde::{Deserialize, Serialize};

/// An entry in the static literature corpus fed to synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: String,
    pub url: String,
}

/// A research gap surfaced by topic discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchTopic {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub novelty_score: f64,
    #[serde(default)]
    pub gap_identified: String,
    #[serde(default)]
    pub optimization_potential: f64,
    #[serde(default)]
    pub feasibility_risk: Option<FeasibilityRisk>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeasibilityRisk {
    Low,
    Medium,
    High,
}

/// A candidate engineering claim under test.
///
/// The first hypothesis the collaborator returns is the one a cycle pursues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
    pub title: String,
    pub statement: String,
    #[serde(default)]
    pub supporting_evidence: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub expected_contribution: String,
    #[serde(default)]
    pub verification_analysis: VerificationAnalysis,
    #[serde(default)]
    pub is_optimization_focus: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationAnalysis {
    /// 0.0 - 1.0
    pub confidence: f64,
    #[serde(default)]
    pub data_adequacy: String,
}

/// A simulation script produced by the code lab, with its mock run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeVerification {
    pub filename: String,
    #[serde(default)]
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub test_results: String,
    pub status: CodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_metrics: Option<ExecutionMetrics>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodeStatus {
    Passed,
    Failed,
    Error,
}

impl CodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionMetrics {
    pub convergence_rate: f64,
    pub stability_index: f64,
    pub compute_time_ms: f64,
    /// 0.0 - 1.0
    pub mhd_stability_level: f64,
}
