//! Prompt text for each collaborator operation.
//!
//! Every structured prompt names the exact JSON shape it expects back; the
//! response is deserialized strictly against the matching model type.

use crate::models::*;

use super::VisualMode;

pub fn discover_topics(subsystem: &EngineSubsystem) -> String {
    format!(
        "Task: Identify 3 high-impact research topics for INCREMENTAL IMPROVEMENT of the {name}.
SPECS: {specs}. TRL: {status}%.
Focus: Cost reduction and engineering practicality.
Return a JSON array of 3 objects with properties: title, description, noveltyScore (1-100), \
gapIdentified, optimizationPotential (1-100), feasibilityRisk (Low|Medium|High).",
        name = subsystem.name,
        specs = subsystem.specifications,
        status = subsystem.status,
    )
}

pub fn synthesize_literature(papers: &[Paper]) -> String {
    let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
    format!(
        "Concisely synthesize current industrial state-of-the-art for D-D fusion core materials \
and MHD stability. Focus on actionable engineering data.
Reference corpus: {}.",
        titles.join("; ")
    )
}

pub fn generate_hypotheses(
    synthesis: &str,
    knowledge: &RocketKnowledgeState,
    lead_topic: Option<&ResearchTopic>,
) -> String {
    let focus = lead_topic
        .map(|t| format!("\nPriority gap: {} - {}", t.title, t.gap_identified))
        .unwrap_or_default();
    format!(
        "Forge a single, testable, high-impact engineering hypothesis to improve the Master Blueprint.
Blueprint: {doc}
Context: {synthesis}{focus}
Return a JSON array of 1 object with properties: title, statement, supportingEvidence, \
methodology, expectedContribution, verificationAnalysis {{ confidence (0-1), dataAdequacy }}, \
isOptimizationFocus (boolean).",
        doc = knowledge.master_design_doc,
    )
}

pub fn simulation_telemetry(hypothesis: &Hypothesis) -> String {
    format!(
        "Simulate the impact of this design modification on a D-D fusion core: \"{}\".
Output 6 technical telemetry metrics as a JSON object:
- plasmaPressure (Pa)
- fuelFlowRate (kg/s)
- neutronFlux (n/cm2/s)
- containmentStability (0-1.0)
- thermalGradient (K/m)
- mhdConvergence (boolean)
Ensure values are physically plausible for a high-performance fusion engine.",
        hypothesis.statement
    )
}

pub fn visual(description: &str, mode: VisualMode) -> String {
    let subject = match mode {
        VisualMode::Plasma => "High-energy magnetic plasma confinement",
        VisualMode::Fuel => "High-velocity fluid fuel injection streamlines",
        VisualMode::Fusion => "3D cross-section of a D-D fusion reaction core",
    };
    format!(
        "Professional technical 3D CAD simulation visualization: {subject}.
Context: {description}.
Style: Scientific ray-tracing, glowing energetic particles, volumetric lighting, dark blueprint background."
    )
}

pub fn run_code_lab(hypothesis: &Hypothesis) -> String {
    format!(
        "Generate a concise Python script to verify the thermal efficiency of: \"{}\".
Include mock execution results. Return a JSON array of 1 object with properties: filename, \
language, code, testResults, status (PASSED|FAILED|ERROR), executionMetrics {{ convergenceRate, \
stabilityIndex, computeTimeMs, mhdStabilityLevel (0-1) }}.",
        hypothesis.statement
    )
}

pub fn verify_hypothesis(hypothesis: &Hypothesis, code: &[CodeVerification]) -> String {
    let runs: Vec<String> = code
        .iter()
        .map(|c| format!("{} [{}]: {}", c.filename, c.status.as_str(), c.test_results))
        .collect();
    format!(
        "Rigorous Verification Audit: Evaluate hypothesis \"{title}\" for practical D-D fusion \
engine implementation.
Statement: {statement}
Code lab runs: {runs}
Return a JSON object with properties physicsReview, materialReview, engineeringReview, \
manufacturingReview (each {{ agentName, role, verdict (VALIDATED|SKEPTICAL|FLAWED), rationale, \
feasibilityRating (1-10), practicalityBottleneck }}), overallConfidence (0-1), \
practicalityScore (1-100), readinessLevel (TRL 1-9).",
        title = hypothesis.title,
        statement = hypothesis.statement,
        runs = if runs.is_empty() {
            "none".to_string()
        } else {
            runs.join("; ")
        },
    )
}

pub fn publish_journal(hypothesis: &Hypothesis, verification: &VerificationSuiteResults) -> String {
    format!(
        "Publish the final optimization report for: {title}.
Verification confidence: {confidence:.2}, TRL {trl}.
Highlight confirmed improvements to the blueprint.
Return a JSON object with properties: journalName, literatureReview, methodology, formalProof, \
resultsPreview, conclusion, evidenceData (array of {{ label, value, trend (rising|falling|stable) }}), \
chartData {{ label, points (array of {{ x, y }}), color }}, simulationSummary {{ plasmaStability, \
fuelThroughput, thermalGradient, mhdConvergence }}, isBreakthrough (boolean).",
        title = hypothesis.title,
        confidence = verification.overall_confidence,
        trl = verification.readiness_level,
    )
}

pub fn update_knowledge_state(current: &RocketKnowledgeState, report: &ResearchReport) -> String {
    let subsystems = serde_json::to_string(&current.subsystems).unwrap_or_default();
    format!(
        "Update the Master Design Blueprint based on the latest findings: {title}.
Conclusion: {conclusion}
Target completion of all subsystems to 100% status (TRL 9).
Adjust 'specifications', 'status', 'costEfficiency' and 'feasibilityAudit' of the relevant subsystems.
Current subsystems: {subsystems}
Return a JSON object with properties: subsystems (all five keys: propulsion, thermal, structural, \
avionics, fuel), masterDesignDoc, breakthroughs (array, only new entries), simulationTelemetry.",
        title = report.title,
        conclusion = report.conclusion,
    )
}

pub fn meta_analysis(knowledge: &RocketKnowledgeState, logs: &[AgentLog]) -> String {
    let subsystems = serde_json::to_string(&knowledge.subsystems).unwrap_or_default();
    let recent = serde_json::to_string(logs).unwrap_or_default();
    format!(
        "You are MAIRIS-OBSERVATORY-1 (M-O1), a micro-bot that observes, measures and reports on \
the MAIRIS PRIME rocketry synthesis system.
Analyze the current system state and recent agent logs to suggest improvements.

SYSTEM STATE: {subsystems}
RECENT LOGS: {recent}

Return a JSON object with properties: timestamp (ISO), systemHealth (0-100), agentEfficiency \
(0-100), observations (array of {{ category, severity (low|medium|high), finding, \
suggestedAction }}), performanceMetrics (array of {{ label, value (0-100) }}), summary.
Focus ONLY on the research process, subsystem optimization strategies and agent coordination."
    )
}
