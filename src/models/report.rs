use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Hypothesis, VerificationSuiteResults};

/// The published output of one completed cycle.
///
/// Immutable once created. Owned by value by
/// [`RocketKnowledgeState::past_reports`](super::RocketKnowledgeState).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchReport {
    pub id: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub journal_name: String,
    pub hypothesis: Hypothesis,
    /// Absent only in documents imported from early dashboard versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_suite: Option<VerificationSuiteResults>,
    #[serde(default)]
    pub literature_review: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub formal_proof: String,
    #[serde(default)]
    pub results_preview: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub evidence_data: Vec<EvidencePoint>,
    #[serde(default)]
    pub chart_data: ChartSeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_summary: Option<SimulationSummary>,
    #[serde(default)]
    pub is_breakthrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,
}

/// What the journal editor returns: the report body without the identity,
/// hypothesis and verification fields the orchestrator fills in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalDraft {
    pub journal_name: String,
    pub literature_review: String,
    pub methodology: String,
    pub formal_proof: String,
    pub results_preview: String,
    pub conclusion: String,
    pub evidence_data: Vec<EvidencePoint>,
    pub chart_data: ChartSeries,
    pub simulation_summary: Option<SimulationSummary>,
    pub is_breakthrough: bool,
}

/// A labelled numeric delta shown as evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidencePoint {
    pub label: String,
    pub value: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// A named series; point order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub points: Vec<ChartPoint>,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub x: ChartX,
    pub y: f64,
}

/// Chart abscissa: the model emits either category labels or numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChartX {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub plasma_stability: f64,
    pub fuel_throughput: f64,
    pub thermal_gradient: String,
    pub mhd_convergence: bool,
}

/// A compact view of a report for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub is_breakthrough: bool,
    pub overall_confidence: Option<f64>,
}

impl From<&ResearchReport> for ReportSummary {
    fn from(report: &ResearchReport) -> Self {
        Self {
            id: report.id.clone(),
            title: report.title.clone(),
            timestamp: report.timestamp,
            is_breakthrough: report.is_breakthrough,
            overall_confidence: report
                .verification_suite
                .as_ref()
                .map(|v| v.overall_confidence),
        }
    }
}
