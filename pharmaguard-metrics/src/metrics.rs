//! Risk and confidence metrics shown on the report overview.

use std::fmt::{self, Display};

use pharmaguard_core::{Report, RiskLabel};
use serde::Serialize;

/// Display tier for a confidence score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ConfidenceBucket {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBucket::VeryHigh => "Very High",
            ConfidenceBucket::High => "High",
            ConfidenceBucket::Medium => "Medium",
            ConfidenceBucket::Low => "Low",
            ConfidenceBucket::VeryLow => "Very Low",
        }
    }
}

impl Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score for labels outside the table.
const DEFAULT_COMPATIBILITY: u8 = 50;

///
/// Bucket a confidence score. Each tier includes its lower bound.
///
/// # Arguments
/// - score: confidence in [0, 1], clamped upstream
pub fn confidence_bucket(score: f64) -> ConfidenceBucket {
    if score >= 0.90 {
        ConfidenceBucket::VeryHigh
    } else if score >= 0.75 {
        ConfidenceBucket::High
    } else if score >= 0.55 {
        ConfidenceBucket::Medium
    } else if score >= 0.35 {
        ConfidenceBucket::Low
    } else {
        ConfidenceBucket::VeryLow
    }
}

/// Drug compatibility score (0-100) for a risk label.
pub fn compatibility_score(label: &RiskLabel) -> u8 {
    match label {
        RiskLabel::Safe => 90,
        RiskLabel::AdjustDosage => 60,
        RiskLabel::Ineffective => 30,
        RiskLabel::Toxic => 10,
        RiskLabel::Unknown | RiskLabel::Other(_) => DEFAULT_COMPATIBILITY,
    }
}

/// Red alert: the drug will not work or is dangerous.
pub fn alert_flag(label: &RiskLabel) -> bool {
    matches!(label, RiskLabel::Ineffective | RiskLabel::Toxic)
}

/// Amber warning: the drug needs a dose change.
pub fn warning_flag(label: &RiskLabel) -> bool {
    matches!(label, RiskLabel::AdjustDosage)
}

/// Severity wording used alongside the risk label.
pub fn severity(label: &RiskLabel) -> &'static str {
    match label {
        RiskLabel::Safe => "none",
        RiskLabel::AdjustDosage => "moderate",
        RiskLabel::Toxic => "critical",
        RiskLabel::Ineffective => "high",
        RiskLabel::Unknown | RiskLabel::Other(_) => "low",
    }
}

/// Confidence as a whole percentage, e.g. `0.95` -> `"95%"`.
pub fn confidence_percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Metric accessors for anything carrying a risk assessment.
pub trait ReportMetrics {
    fn confidence_bucket(&self) -> ConfidenceBucket;

    fn compatibility_score(&self) -> u8;

    fn is_alert(&self) -> bool;

    fn is_warning(&self) -> bool;

    /// Severity as reported by the service, else derived from the label.
    fn severity(&self) -> String;
}

impl ReportMetrics for Report {
    fn confidence_bucket(&self) -> ConfidenceBucket {
        confidence_bucket(self.confidence_score())
    }

    fn compatibility_score(&self) -> u8 {
        compatibility_score(self.risk_label())
    }

    fn is_alert(&self) -> bool {
        alert_flag(self.risk_label())
    }

    fn is_warning(&self) -> bool {
        warning_flag(self.risk_label())
    }

    fn severity(&self) -> String {
        match &self.risk_assessment.severity {
            Some(severity) if !severity.is_empty() => severity.clone(),
            _ => severity(self.risk_label()).to_string(),
        }
    }
}

///
/// The headline figures of a report, ready to print.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiSummary {
    pub drug: String,
    pub risk_label: String,
    pub severity: String,
    pub phenotype: String,
    pub confidence: String,
    pub confidence_bucket: ConfidenceBucket,
    pub compatibility_score: u8,
    pub alert: bool,
    pub warning: bool,
}

impl KpiSummary {
    pub fn from_report(report: &Report) -> Self {
        KpiSummary {
            drug: report.drug.to_uppercase(),
            risk_label: report.risk_label().to_string(),
            severity: report.severity(),
            phenotype: report.pharmacogenomic_profile.phenotype.clone(),
            confidence: confidence_percent(report.confidence_score()),
            confidence_bucket: report.confidence_bucket(),
            compatibility_score: report.compatibility_score(),
            alert: report.is_alert(),
            warning: report.is_warning(),
        }
    }
}
