//! Plain-text rendering of a published report.

use std::fmt::Write;

use crate::models::ResearchReport;

const RULE: &str = "========================================";

/// Render a report as a self-contained text document.
///
/// Output is deterministic for a given report. Sections with no content are
/// left out.
///
/// Example output:
/// ```text
/// ========================================
/// MAIRIS PRIME RESEARCH REPORT
/// ========================================
/// Title:     Regenerative cooling loop
/// Report ID: rep-8f2c...
/// Timestamp: 2026-03-01T12:00:00+00:00
///
/// HYPOTHESIS
/// ...
/// ```
pub fn render_report(report: &ResearchReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &ResearchReport) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "MAIRIS PRIME RESEARCH REPORT")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Title:     {}", report.title)?;
    writeln!(out, "Report ID: {}", report.id)?;
    writeln!(out, "Timestamp: {}", report.timestamp.to_rfc3339())?;
    if !report.journal_name.is_empty() {
        writeln!(out, "Journal:   {}", report.journal_name)?;
    }
    if report.is_breakthrough {
        writeln!(out, "Status:    BREAKTHROUGH")?;
    }

    section(out, "HYPOTHESIS", &report.hypothesis.statement)?;
    section(out, "FORMAL PROOF", &report.formal_proof)?;
    section(out, "METHODOLOGY", &report.methodology)?;
    section(out, "CONCLUSION", &report.conclusion)?;

    if let Some(suite) = &report.verification_suite {
        writeln!(out)?;
        writeln!(out, "VERIFICATION")?;
        writeln!(
            out,
            "Overall confidence: {:.1}%",
            suite.overall_confidence * 100.0
        )?;
        writeln!(out, "Practicality score: {:.0}/100", suite.practicality_score)?;
        writeln!(out, "Readiness level:    TRL {}", suite.readiness_level)?;
        for review in suite.reviews() {
            writeln!(
                out,
                "- {} ({}): {}",
                review.agent_name,
                review.role,
                review.verdict.as_str()
            )?;
        }

        if !suite.code_lab_results.is_empty() {
            writeln!(out)?;
            writeln!(out, "SIMULATION CODE")?;
            for file in &suite.code_lab_results {
                writeln!(out, "--- {} [{}] ---", file.filename, file.status.as_str())?;
                writeln!(out, "{}", file.code.trim_end())?;
                if !file.test_results.is_empty() {
                    writeln!(out, "# result: {}", file.test_results)?;
                }
            }
        }
    }

    writeln!(out, "{}", RULE)
}

fn section(out: &mut String, heading: &str, body: &str) -> std::fmt::Result {
    if body.trim().is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}", heading)?;
    writeln!(out, "{}", body.trim())
}
