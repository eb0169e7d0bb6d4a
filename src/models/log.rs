use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line in the live agent log.
///
/// Volatile: the log lives only in memory and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentLog {
    pub agent_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
    /// Simulation output.
    Sim,
    /// Visual rendering output.
    Vis,
}
