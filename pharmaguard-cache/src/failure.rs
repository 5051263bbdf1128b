//! Analysis failures as values, classified for display.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

use super::consts::NO_VARIANT_MARKER;

static DRUG_IN_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"for (\w+) \(").expect("valid drug pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The file carries none of the variants the drug's gene needs.
    NoVariant,
    Generic,
}

///
/// Why an analysis produced no report. The message is shown verbatim.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(message: impl Into<String>) -> Self {
        AnalysisFailure {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        if self.message.contains(NO_VARIANT_MARKER) {
            FailureKind::NoVariant
        } else {
            FailureKind::Generic
        }
    }

    ///
    /// The drug named in a message like `... for CODEINE (gene CYP2D6)`,
    /// upper-cased, else the requested drug.
    ///
    /// # Arguments
    /// - requested: the drug the analysis was asked for
    pub fn detected_drug(&self, requested: &str) -> String {
        DRUG_IN_MESSAGE
            .captures(&self.message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(requested)
            .to_uppercase()
    }
}

impl Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(
        "No pharmacogenomic variant found for CODEINE (requires CYP2D6)",
        FailureKind::NoVariant
    )]
    #[case("Unsupported VCF format or no matching variants found.", FailureKind::Generic)]
    #[case("HTTP error! status: 500, details: boom", FailureKind::Generic)]
    fn test_kind(#[case] message: &str, #[case] expected: FailureKind) {
        assert_eq!(AnalysisFailure::new(message).kind(), expected);
    }

    #[rstest]
    #[case("No pharmacogenomic variant found for codeine (requires CYP2D6)", "CODEINE")]
    #[case("No pharmacogenomic variant found", "WARFARIN")]
    fn test_detected_drug(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(AnalysisFailure::new(message).detected_drug("warfarin"), expected);
    }
}
