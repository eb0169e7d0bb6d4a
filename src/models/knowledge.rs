use serde::{Deserialize, Serialize};

use super::{EngineSubsystem, ResearchReport, Subsystems};

/// The root aggregate: everything the lab has learned so far.
///
/// This is the single unit of persistence. It is always serialized and
/// replaced as a whole, never patched field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RocketKnowledgeState {
    pub subsystems: Subsystems,
    pub master_design_doc: String,
    pub cycle_count: u32,
    pub total_papers_processed: u32,
    /// Chronological: oldest first.
    #[serde(default)]
    pub breakthroughs: Vec<Breakthrough>,
    /// Most recent first, never longer than [`MAX_PAST_REPORTS`].
    #[serde(default)]
    pub past_reports: Vec<ResearchReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_telemetry: Option<SimulationTelemetry>,
}

/// Upper bound on `past_reports`.
pub const MAX_PAST_REPORTS: usize = 50;

impl RocketKnowledgeState {
    /// The fixed seed state a fresh lab starts from.
    pub fn genesis() -> Self {
        Self {
            subsystems: Subsystems {
                propulsion: EngineSubsystem::genesis(
                    "Propulsion Unit",
                    12,
                    "Baseline methalox combustion chamber v1.",
                ),
                thermal: EngineSubsystem::genesis(
                    "Thermal Systems",
                    8,
                    "Passive ablative heat shield cooling.",
                ),
                structural: EngineSubsystem::genesis(
                    "Structural Integrity",
                    15,
                    "Aluminum-lithium alloy framework.",
                ),
                avionics: EngineSubsystem::genesis(
                    "Avionics & Control",
                    5,
                    "Standard PID flight controllers.",
                ),
                fuel: EngineSubsystem::genesis("Fuel Management", 10, "Single-stage pump system."),
            },
            master_design_doc:
                "Initial architectural framework established. Goal: 100% viability.".to_string(),
            cycle_count: 0,
            total_papers_processed: 0,
            breakthroughs: Vec::new(),
            past_reports: Vec::new(),
            simulation_telemetry: None,
        }
    }

    pub fn find_report(&self, id: &str) -> Option<&ResearchReport> {
        self.past_reports.iter().find(|r| r.id == id)
    }
}

/// A high-impact outcome flagged during knowledge integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Breakthrough {
    pub id: String,
    pub title: String,
    pub date: String,
    /// Conventionally a single-digit "sigma" value, but not bounded.
    pub impact_score: f64,
    pub description: String,
    #[serde(default)]
    pub proof_of_concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint_impact: Option<String>,
    /// Lookup key into `past_reports`; the report may have aged out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,
}

/// Simulated core telemetry from the MHD stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationTelemetry {
    /// Pa
    pub plasma_pressure: f64,
    /// kg/s
    pub fuel_flow_rate: f64,
    /// n/cm²/s
    pub neutron_flux: f64,
    /// 0.0 - 1.0
    pub containment_stability: f64,
    /// K/m
    pub thermal_gradient: f64,
    pub mhd_convergence: bool,
}
