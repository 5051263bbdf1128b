//! Plain-text and JSON exports of a report.

use pharmaguard_core::Report;
use pharmaguard_core::models::report::parse_timestamp;

const NO_PATIENT: &str = "UNASSIGNED";

/// `Feb 19, 2026, 10:11 UTC`; empty when the timestamp is missing or unparsable.
pub fn formatted_timestamp(report: &Report) -> String {
    report
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .map(|ts| ts.format("%b %d, %Y, %H:%M UTC").to_string())
        .unwrap_or_default()
}

fn patient_id(report: &Report) -> &str {
    report.patient_id.as_deref().unwrap_or(NO_PATIENT)
}

///
/// Render the clinician-facing plain-text report.
///
pub fn render_text_report(report: &Report) -> String {
    let lines = [
        "PHARMGUARD CLINICAL REPORT".to_string(),
        "============================".to_string(),
        format!("Patient ID: {}", patient_id(report)),
        format!("Drug: {}", report.drug),
        format!("Analysis Date: {}", report.timestamp.as_deref().unwrap_or("")),
        format!("Risk Level: {}", report.risk_label()),
        format!(
            "Recommendation: {}",
            report.clinical_recommendation.recommendation
        ),
        format!("Evidence: {}", report.clinical_recommendation.evidence),
        format!("Summary: {}", report.llm_generated_explanation.summary),
    ];
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Pretty-printed JSON body of the report.
pub fn render_json_report(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn text_report_filename(report: &Report) -> String {
    format!("PharmGuard_Report_{}.txt", patient_id(report))
}

pub fn json_report_filename(report: &Report) -> String {
    format!("PharmGuard_{}_{}.json", patient_id(report), report.drug)
}
