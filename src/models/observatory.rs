use serde::{Deserialize, Serialize};

/// The meta-analysis audit of the lab itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BotReport {
    #[serde(default)]
    pub timestamp: String,
    /// 0 - 100
    pub system_health: f64,
    /// 0 - 100
    #[serde(default)]
    pub agent_efficiency: f64,
    #[serde(default)]
    pub observations: Vec<BotObservation>,
    #[serde(default)]
    pub performance_metrics: Vec<PerformanceMetric>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BotObservation {
    pub category: String,
    pub severity: Severity,
    pub finding: String,
    #[serde(default)]
    pub suggested_action: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetric {
    pub label: String,
    pub value: f64,
}
