use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use pharmaguard_cache::{AnalysisFailure, AnalysisState, FailureKind};
use pharmaguard_core::consts::{SUPPORTED_DRUGS, gene_for_drug};
use pharmaguard_core::{AnnotationFile, GENE_PANEL, Report};
use pharmaguard_metrics::export::{formatted_timestamp, json_report_filename, text_report_filename};
use pharmaguard_metrics::{KpiSummary, render_json_report, render_text_report};

use crate::open_repository;

/// Run (or reuse) an analysis and print the outcome.
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let drug = matches
        .get_one::<String>("drug")
        .expect("A drug name is required.");
    let as_json = matches.get_flag("json");
    let export = matches.get_one::<String>("export").map(PathBuf::from);

    if gene_for_drug(drug).is_none() {
        warn!(
            "{} is not one of the supported drugs; the service may not assess it",
            drug
        );
    }

    let file = match matches.get_one::<String>("vcf") {
        Some(vcf) => Some(
            AnnotationFile::from_path(Path::new(vcf))
                .with_context(|| format!("Can't load {}", vcf))?,
        ),
        None => None,
    };

    let mut repository = open_repository(matches)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Analyzing {}...", drug.to_uppercase()));

    let state = repository.request(drug, file.as_ref()).clone();
    spinner.finish_and_clear();

    match state {
        AnalysisState::Delivered(report) => {
            if as_json {
                println!("{}", render_json_report(&report)?);
            } else {
                print_summary(&report);
            }
            if let Some(folder) = export {
                export_report(&report, &folder)?;
            }
        }
        AnalysisState::Failed(failure) => {
            for line in failure_lines(&failure, drug) {
                println!("{}", line);
            }
            bail!("Analysis of {} failed", drug.to_uppercase());
        }
        AnalysisState::Idle | AnalysisState::Requesting => {
            unreachable!("A finished request is either delivered or failed")
        }
    }

    Ok(())
}

/// Print the headline figures of a report.
pub fn print_summary(report: &Report) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

fn summary_lines(report: &Report) -> Vec<String> {
    let kpi = KpiSummary::from_report(report);
    let flag = if kpi.alert {
        " [ALERT]"
    } else if kpi.warning {
        " [WARNING]"
    } else {
        ""
    };

    let mut lines = vec![format!(
        "Patient ID: {}",
        report.patient_id.as_deref().unwrap_or("-")
    )];
    let date = formatted_timestamp(report);
    if !date.is_empty() {
        lines.push(format!("Analysis Date: {}", date));
    }
    lines.extend([
        format!("Drug: {}", kpi.drug),
        format!("Risk: {}{} (severity: {})", kpi.risk_label, flag, kpi.severity),
        format!("Phenotype: {}", kpi.phenotype),
        format!("Confidence: {} ({})", kpi.confidence, kpi.confidence_bucket),
        format!("Drug compatibility: {}/100", kpi.compatibility_score),
        format!(
            "Recommendation: {}",
            report.clinical_recommendation.recommendation
        ),
    ]);
    lines
}

fn failure_lines(failure: &AnalysisFailure, drug: &str) -> Vec<String> {
    match failure.kind() {
        FailureKind::NoVariant => {
            let detected = failure.detected_drug(drug);
            let mut lines = vec!["Incompatible File".to_string()];
            match gene_for_drug(&detected) {
                Some(gene) => lines.push(format!(
                    "The file has no {} variants, which are needed to assess {}.",
                    gene, detected
                )),
                None => lines.push(format!(
                    "The file has no variants in the gene needed to assess {}.",
                    detected
                )),
            }
            let genes: Vec<&str> = GENE_PANEL.iter().map(|g| g.as_str()).collect();
            lines.push(format!("Supported genes: {}", genes.join(", ")));
            let drugs: Vec<String> = SUPPORTED_DRUGS
                .iter()
                .map(|(name, gene)| format!("{} ({})", name, gene))
                .collect();
            lines.push(format!("Supported drugs: {}", drugs.join(", ")));
            lines
        }
        FailureKind::Generic => vec!["Analysis Failed".to_string(), failure.message.clone()],
    }
}

fn export_report(report: &Report, folder: &Path) -> Result<()> {
    create_dir_all(folder)
        .with_context(|| format!("Can't create export folder {}", folder.display()))?;

    let text_path = folder.join(text_report_filename(report));
    write(&text_path, render_text_report(report))?;
    let json_path = folder.join(json_report_filename(report));
    write(&json_path, render_json_report(report)?)?;

    println!("Exported {}", text_path.display());
    println!("Exported {}", json_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs;

    use crate::build_parser;

    fn path_to_report() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("tests/data/reports/codeine_report.json")
    }

    #[fixture]
    fn report() -> Report {
        let raw = fs::read_to_string(path_to_report()).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn analyze_matches(cache_folder: &Path, drug: &str) -> ArgMatches {
        let matches = build_parser()
            .try_get_matches_from([
                "pharmaguard",
                "analyze",
                "--drug",
                drug,
                "--cache-folder",
                cache_folder.to_str().unwrap(),
                "--api",
                "http://localhost:1",
            ])
            .unwrap();
        matches.subcommand_matches("analyze").unwrap().clone()
    }

    #[rstest]
    fn test_summary_shows_analysis_date(report: Report) {
        let lines = summary_lines(&report);

        assert_eq!(lines[0], "Patient ID: PATIENT_MLTAWIYO_3FA91C");
        assert_eq!(lines[1], "Analysis Date: Feb 19, 2026, 10:11 UTC");
        assert_eq!(lines[2], "Drug: CODEINE");
    }

    #[rstest]
    fn test_summary_without_timestamp_skips_date(report: Report) {
        let undated = Report {
            timestamp: None,
            ..report
        };

        let lines = summary_lines(&undated);

        assert!(lines.iter().all(|line| !line.starts_with("Analysis Date")));
        assert_eq!(lines[1], "Drug: CODEINE");
    }

    #[rstest]
    #[case(
        "No pharmacogenomic variant found for CODEINE (requires CYP2D6)",
        "codeine",
        "The file has no CYP2D6 variants, which are needed to assess CODEINE."
    )]
    #[case(
        "No pharmacogenomic variant found for warfarin (requires CYP2C9)",
        "codeine",
        "The file has no CYP2C9 variants, which are needed to assess WARFARIN."
    )]
    #[case(
        "No pharmacogenomic variant found",
        "aspirin",
        "The file has no variants in the gene needed to assess ASPIRIN."
    )]
    fn test_incompatible_file_names_required_gene(
        #[case] message: &str,
        #[case] drug: &str,
        #[case] expected: &str,
    ) {
        let lines = failure_lines(&AnalysisFailure::new(message), drug);

        assert_eq!(lines[0], "Incompatible File");
        assert_eq!(lines[1], expected);
    }

    #[rstest]
    fn test_generic_failure_lines() {
        let failure = AnalysisFailure::new("HTTP error! status: 500, details: boom");
        let lines = failure_lines(&failure, "codeine");
        assert_eq!(
            lines,
            vec![
                "Analysis Failed".to_string(),
                "HTTP error! status: 500, details: boom".to_string()
            ]
        );
    }

    #[rstest]
    #[case("codeine", "Analysis of CODEINE failed")]
    #[case("aspirin", "Analysis of ASPIRIN failed")]
    fn test_failed_analysis_is_an_error(#[case] drug: &str, #[case] expected: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let matches = analyze_matches(tempdir.path(), drug);

        let result = run_analyze(&matches);

        let error = result.expect_err("a failed analysis must not exit cleanly");
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_cached_analysis_succeeds() {
        let tempdir = tempfile::tempdir().unwrap();
        let reports = tempdir.path().join("reports");
        fs::create_dir_all(&reports).unwrap();
        fs::copy(path_to_report(), reports.join("pharmaguard_codeine.json")).unwrap();
        let matches = analyze_matches(tempdir.path(), "codeine");

        assert!(run_analyze(&matches).is_ok());
    }
}
