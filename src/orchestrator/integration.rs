use std::collections::HashSet;

use uuid::Uuid;

use crate::collaborator::KnowledgeUpdate;
use crate::models::*;
use crate::store;

/// Confidence at or above which a readiness change counts as verified.
const VERIFIED_CONFIDENCE: f64 = 0.5;

/// Fold a completed cycle into the knowledge state.
///
/// Subsystem values come only from the collaborator's `update`; when it is
/// absent (malformed response) the current subsystems are kept as they are.
/// The cycle counter, paper count, subsystem history and breakthrough list
/// only ever grow.
pub fn integrate(
    current: &RocketKnowledgeState,
    update: Option<KnowledgeUpdate>,
    report: &ResearchReport,
    telemetry: Option<SimulationTelemetry>,
    papers_processed: u32,
) -> RocketKnowledgeState {
    let cycle = current.cycle_count + 1;
    let mut next = current.clone();
    next.cycle_count = cycle;
    next.total_papers_processed = current.total_papers_processed + papers_processed;

    let verified = report
        .verification_suite
        .as_ref()
        .is_some_and(|v| v.overall_confidence >= VERIFIED_CONFIDENCE);

    let mut update_telemetry = None;
    if let Some(update) = update {
        let mut subsystems = update.subsystems;
        for key in SubsystemKey::ALL {
            let before = current.subsystems.get(key);
            let after = subsystems.get_mut(key);
            after.optimization_history = before.optimization_history.clone();
            let delta = i32::from(after.status) - i32::from(before.status);
            if delta != 0 {
                after.optimization_history.push(OptimizationRecord {
                    cycle,
                    delta,
                    verified,
                });
            }
        }
        next.subsystems = subsystems;

        if let Some(doc) = update.master_design_doc.filter(|d| !d.trim().is_empty()) {
            next.master_design_doc = doc;
        }

        let mut known: HashSet<String> = next.breakthroughs.iter().map(|b| b.id.clone()).collect();
        for breakthrough in update.breakthroughs {
            if known.insert(breakthrough.id.clone()) {
                next.breakthroughs.push(breakthrough);
            }
        }
        update_telemetry = update.simulation_telemetry;
    }

    if let Some(telemetry) = update_telemetry.or(telemetry) {
        next.simulation_telemetry = Some(telemetry);
    }

    let recorded = next
        .breakthroughs
        .iter()
        .any(|b| b.report_id.as_deref() == Some(report.id.as_str()));
    if report.is_breakthrough && !recorded {
        next.breakthroughs.push(breakthrough_from(report));
    }

    store::merge(current, next, report.clone())
}

fn breakthrough_from(report: &ResearchReport) -> Breakthrough {
    let impact = report
        .verification_suite
        .as_ref()
        .map(|v| f64::from(v.readiness_level))
        .unwrap_or(1.0);
    Breakthrough {
        id: format!("bt-{}", Uuid::new_v4().simple()),
        title: report.title.clone(),
        date: report.timestamp.format("%Y-%m-%d").to_string(),
        impact_score: impact,
        description: report.conclusion.clone(),
        proof_of_concept: report.formal_proof.clone(),
        blueprint_impact: Some(report.results_preview.clone()).filter(|s| !s.is_empty()),
        report_id: Some(report.id.clone()),
        visual_url: report.visual_url.clone(),
    }
}
