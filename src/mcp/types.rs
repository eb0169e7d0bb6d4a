//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetPrioritySubsystemRequest {
    #[schemars(
        description = "Subsystem to pin: 'propulsion', 'thermal', 'structural', 'avionics' or 'fuel'. Omit or null to clear the pin and target the weakest subsystem."
    )]
    #[serde(default)]
    pub subsystem: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetAutonomousRequest {
    #[schemars(
        description = "true to run cycles back to back (starts one immediately if idle), false to stop after the current cycle"
    )]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportReportRequest {
    #[schemars(description = "The id of a past report, as returned by list_reports")]
    pub report_id: String,
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SubsystemInfo {
    pub key: String,
    pub name: String,
    pub status: u8,
    pub specifications: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LabStatusResponse {
    pub stage: String,
    pub busy: bool,
    pub autonomous: bool,
    pub credentials_required: bool,
    /// Pinned subsystem, if any
    pub priority_override: Option<String>,
    /// Subsystem the next cycle will target
    pub priority_target: String,
    pub cycle_count: u32,
    pub subsystems: Vec<SubsystemInfo>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReportInfo {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub is_breakthrough: bool,
    pub overall_confidence: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReportListResponse {
    pub reports: Vec<ReportInfo>,
}
