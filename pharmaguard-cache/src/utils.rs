use super::consts::{
    DEFAULT_API, DEFAULT_ASSISTANT_MODEL, PHARMAGUARD_API_ENV, PHARMAGUARD_ASSISTANT_API_ENV,
    PHARMAGUARD_ASSISTANT_KEY_ENV, PHARMAGUARD_ASSISTANT_MODEL_ENV, PHARMAGUARD_CACHE_ENV,
};
use dirs::home_dir;
use pharmaguard_core::Report;
use std::env;
use std::path::PathBuf;
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct ReportPrint {
    patient_id: String,
    drug: String,
    gene: String,
    risk: String,
    timestamp: String,
}

/// Get default cache folder from environment variable, if not available then use one in the home folder
///
/// # Returns
/// - path to cache folder
pub fn get_default_cache_folder() -> PathBuf {
    if let Ok(val) = env::var(PHARMAGUARD_CACHE_ENV) {
        PathBuf::from(val)
    } else {
        let home = env::var("HOME")
            .or_else(|_| {
                home_dir()
                    .map(|p| p.to_string_lossy().into_owned())
                    .ok_or(std::env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| "/tmp".to_string());

        let mut path = PathBuf::from(home);
        path.push(".pharmaguard/");
        path
    }
}

/// Expand `$VAR` / `~` references in a configured folder.
pub fn expand_folder(path: PathBuf) -> PathBuf {
    let raw = path.to_string_lossy().into_owned();
    let expanded = shellexpand::full(&raw)
        .unwrap_or_else(|_| raw.clone().into())
        .into_owned();
    PathBuf::from(expanded)
}

/// Drop trailing slashes so paths can be appended with a leading `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Get default analysis service url from environment variable
///
/// # Returns
/// - base url without trailing slash
pub fn get_default_api() -> String {
    normalize_base_url(&env::var(PHARMAGUARD_API_ENV).unwrap_or_else(|_| DEFAULT_API.to_string()))
}

/// Assistant endpoint from the environment, if configured.
pub fn get_default_assistant_api() -> Option<String> {
    env::var(PHARMAGUARD_ASSISTANT_API_ENV).ok()
}

pub fn get_default_assistant_key() -> Option<String> {
    env::var(PHARMAGUARD_ASSISTANT_KEY_ENV).ok()
}

pub fn get_default_assistant_model() -> String {
    env::var(PHARMAGUARD_ASSISTANT_MODEL_ENV).unwrap_or_else(|_| DEFAULT_ASSISTANT_MODEL.to_string())
}

/// Render cached reports as a table, one row per report.
pub fn reports_table(reports: &[Report]) -> String {
    let rows: Vec<ReportPrint> = reports
        .iter()
        .map(|report| ReportPrint {
            patient_id: report.patient_id.clone().unwrap_or_default(),
            drug: report.drug.to_uppercase(),
            gene: report.pharmacogenomic_profile.primary_gene.clone(),
            risk: report.risk_label().to_string(),
            timestamp: report.timestamp.clone().unwrap_or_default(),
        })
        .collect();

    Table::new(rows).to_string()
}

pub fn print_reports(reports: &[Report]) {
    println!("{}", reports_table(reports));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("http://localhost:8000/", "http://localhost:8000")]
    #[case("https://api.example.org//", "https://api.example.org")]
    #[case("https://api.example.org", "https://api.example.org")]
    fn test_normalize_base_url(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_base_url(raw), expected);
    }

    #[rstest]
    fn test_expand_folder_passes_plain_paths() {
        assert_eq!(
            expand_folder(PathBuf::from("/tmp/pharmaguard")),
            PathBuf::from("/tmp/pharmaguard")
        );
    }
}
