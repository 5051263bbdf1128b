use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

///
/// Categorical outcome of the risk rules for a drug and phenotype.
///
/// Serialized as its display text (`"Adjust Dosage"`, not `AdjustDosage`).
/// Labels outside the known set are carried through untouched as `Other`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLabel {
    Safe,
    AdjustDosage,
    Ineffective,
    Toxic,
    Unknown,
    Other(String),
}

impl RiskLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Unknown => "Unknown",
            RiskLabel::Other(label) => label,
        }
    }
}

impl From<&str> for RiskLabel {
    fn from(value: &str) -> Self {
        match value {
            "Safe" => RiskLabel::Safe,
            "Adjust Dosage" => RiskLabel::AdjustDosage,
            "Ineffective" => RiskLabel::Ineffective,
            "Toxic" => RiskLabel::Toxic,
            "Unknown" => RiskLabel::Unknown,
            other => RiskLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for RiskLabel {
    fn from(value: String) -> Self {
        RiskLabel::from(value.as_str())
    }
}

impl From<RiskLabel> for String {
    fn from(value: RiskLabel) -> Self {
        match value {
            RiskLabel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A variant entry as reported back by the analysis service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genotype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_impact: Option<String>,
    /// Anything else the service attached (`rsID`, `zygosity`, `impact`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectedVariant {
    /// A string valued field outside the typed set.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,
    #[serde(default)]
    pub diplotype: String,
    #[serde(default)]
    pub phenotype: String,
    #[serde(default)]
    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    /// Already clamped to [0, 1] by the service.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub recommendation: String,
    #[serde(default)]
    pub evidence: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
}

///
/// Risk report produced by the analysis service for one drug.
///
/// The service never fills `patient_id`; it is attached once, right after a
/// successful analysis, and the report is not modified afterwards.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub drug: String,
    /// ISO-8601 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub risk_assessment: RiskAssessment,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: Explanation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_metrics: Option<QualityMetrics>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    /// Stamp the report with its patient identifier.
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn risk_label(&self) -> &RiskLabel {
        &self.risk_assessment.risk_label
    }

    pub fn confidence_score(&self) -> f64 {
        self.risk_assessment.confidence_score
    }

    ///
    /// The creation time as UTC, if the timestamp is present and parses.
    ///
    /// Offset-less timestamps (`2026-02-19T10:11:12.123456`) are what the
    /// service emits and are read as UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Parse an ISO-8601 timestamp with or without an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
