use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Value, json};

use pharmaguard_cache::consts::{GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE};
use pharmaguard_cache::service::{AnalysisService, ServiceResponse};
use pharmaguard_cache::{
    AnalysisState, FailureKind, KeyValueStore, MemoryStore, ReportCache, ReportCacheStore,
    ReportRepository, ServiceError,
};
use pharmaguard_core::{AnnotationFile, Report};

/// Answers every request with the same body and counts the calls.
struct FakeService {
    body: Result<Value, u16>,
    calls: RefCell<Vec<String>>,
}

impl FakeService {
    fn answering(body: Value) -> Self {
        FakeService {
            body: Ok(body),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        FakeService {
            body: Err(status),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl AnalysisService for FakeService {
    fn analyze(&self, file: &AnnotationFile, drug: &str) -> Result<ServiceResponse, ServiceError> {
        self.calls
            .borrow_mut()
            .push(format!("{}:{}", file.name, drug));
        match &self.body {
            Ok(body) => ServiceResponse::from_json(body.clone()),
            Err(status) => Err(ServiceError::Status {
                status: *status,
                details: "Internal Server Error".to_string(),
            }),
        }
    }
}

fn report_body(drug: &str, timestamp: &str) -> Value {
    json!({
        "drug": drug,
        "timestamp": timestamp,
        "risk_assessment": {"risk_label": "Adjust Dosage", "confidence_score": 0.8, "severity": "moderate"},
        "pharmacogenomic_profile": {
            "primary_gene": "CYP2C9",
            "diplotype": "*1/*3",
            "phenotype": "Intermediate metabolizer",
            "detected_variants": [{"rsid": "rs1057910", "star": "*3", "genotype": "0/1"}]
        },
        "clinical_recommendation": {"recommendation": "Reduce starting dose", "evidence": "CPIC Level A"},
        "llm_generated_explanation": {"summary": "Warfarin clears slowly.", "clinical_summary": "Lower dose."},
        "quality_metrics": {"vcf_parsing_success": true}
    })
}

#[fixture]
fn vcf_file() -> AnnotationFile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests/data/vcf/sample_patient.vcf");
    AnnotationFile::from_path(&path).unwrap()
}

fn repository(service: FakeService) -> ReportRepository<ReportCache<MemoryStore>, FakeService> {
    ReportRepository::new(ReportCache::new(MemoryStore::new()), service)
}

fn seed_drug_key(
    repository: &mut ReportRepository<ReportCache<MemoryStore>, FakeService>,
    drug: &str,
) {
    let cached = report_body(drug, "2026-01-01T00:00:00").to_string();
    repository
        .cache_mut()
        .substrate_mut()
        .set_item(&format!("pharmaguard_{}", drug), &cached)
        .unwrap();
}

#[rstest]
fn test_starts_idle() {
    let repository = repository(FakeService::answering(json!({})));
    assert_eq!(repository.state(), &AnalysisState::Idle);
}

#[rstest]
fn test_cached_drug_key_without_file_skips_service() {
    let mut repository = repository(FakeService::answering(report_body(
        "warfarin",
        "2026-02-19T10:00:00",
    )));
    seed_drug_key(&mut repository, "warfarin");

    let state = repository.request("warfarin", None).clone();

    let report = state.report().expect("cached report delivered");
    assert_eq!(report.drug, "warfarin");
    assert_eq!(report.timestamp.as_deref(), Some("2026-01-01T00:00:00"));
    assert_eq!(repository.service().call_count(), 0);
}

#[rstest]
fn test_no_file_and_no_cache_fails() {
    let mut repository = repository(FakeService::answering(json!({})));

    let failure = repository
        .request("codeine", None)
        .failure()
        .cloned()
        .expect("failure");

    assert_eq!(failure.message, format!("{} codeine", NO_FILE_MESSAGE));
    assert_eq!(failure.kind(), FailureKind::Generic);
    assert_eq!(repository.service().call_count(), 0);
}

#[rstest]
fn test_new_file_bypasses_and_clears_drug_key(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::answering(report_body(
        "warfarin",
        "2026-02-19T10:00:00",
    )));
    seed_drug_key(&mut repository, "warfarin");

    let report = repository
        .request("warfarin", Some(&vcf_file))
        .report()
        .cloned()
        .expect("fresh report");

    assert_eq!(report.timestamp.as_deref(), Some("2026-02-19T10:00:00"));
    assert_eq!(
        *repository.service().calls.borrow(),
        vec!["sample_patient.vcf:warfarin".to_string()]
    );
    assert_eq!(
        repository.cache().substrate().get_item("pharmaguard_warfarin"),
        None
    );
}

#[rstest]
fn test_success_assigns_id_and_caches(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::answering(report_body(
        "warfarin",
        "2026-02-19T10:00:00",
    )));

    let report = repository
        .request("warfarin", Some(&vcf_file))
        .report()
        .cloned()
        .expect("report");

    let patient_id = report.patient_id.clone().expect("patient id assigned");
    assert!(patient_id.starts_with("PATIENT_"));
    assert_eq!(repository.cache().get(&patient_id), Some(report.clone()));
    assert_eq!(repository.cache().get_latest(), Some(report));
}

#[rstest]
fn test_repeated_analyses_never_share_an_id(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::answering(report_body(
        "warfarin",
        "2026-02-19T10:00:00",
    )));

    let ids: HashSet<String> = (0..50)
        .filter_map(|_| {
            repository
                .request("warfarin", Some(&vcf_file))
                .report()
                .and_then(|r| r.patient_id.clone())
        })
        .collect();

    assert_eq!(ids.len(), 50);
    assert_eq!(repository.cache().get_all().len(), 50);
}

#[rstest]
fn test_no_variant_error_is_carried_verbatim(vcf_file: AnnotationFile) {
    let message = "No pharmacogenomic variant found for CODEINE (requires CYP2D6)";
    let mut repository = repository(FakeService::answering(json!({
        "error": true,
        "error_message": message
    })));

    let failure = repository
        .request("codeine", Some(&vcf_file))
        .failure()
        .cloned()
        .expect("failure");

    assert_eq!(failure.message, message);
    assert_eq!(failure.kind(), FailureKind::NoVariant);
    assert_eq!(failure.detected_drug("codeine"), "CODEINE");
    assert!(repository.cache().get_all().is_empty());
}

#[rstest]
fn test_error_without_message_uses_generic_text(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::answering(json!({"error": true})));

    let failure = repository
        .request("simvastatin", Some(&vcf_file))
        .failure()
        .cloned()
        .expect("failure");

    assert_eq!(failure.message, GENERIC_FAILURE_MESSAGE);
    assert_eq!(failure.kind(), FailureKind::Generic);
}

#[rstest]
fn test_transport_failure_is_generic(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::failing(500));

    let failure = repository
        .request("codeine", Some(&vcf_file))
        .failure()
        .cloned()
        .expect("failure");

    assert_eq!(
        failure.message,
        "HTTP error! status: 500, details: Internal Server Error"
    );
    assert_eq!(failure.kind(), FailureKind::Generic);
}

#[rstest]
fn test_failure_then_retry_succeeds(vcf_file: AnnotationFile) {
    let mut repository = repository(FakeService::failing(503));
    assert!(repository.request("codeine", Some(&vcf_file)).failure().is_some());

    // resubmission is a fresh request against a recovered service
    let recovered = FakeService::answering(report_body("codeine", "2026-02-19T10:00:00"));
    let mut repository = ReportRepository::new(
        ReportCache::new(repository.cache().substrate().clone()),
        recovered,
    );
    assert!(repository.request("codeine", Some(&vcf_file)).report().is_some());
}

#[rstest]
fn test_file_backed_repository_persists() -> Result<(), Box<dyn std::error::Error + 'static>> {
    let tempdir = tempfile::tempdir()?;
    let body = report_body("clopidogrel", "2026-02-19T10:00:00");
    let report: Report = serde_json::from_value(body)?;

    let mut repository = ReportRepository::builder()
        .with_cache_folder(tempdir.path().to_path_buf())
        .with_api("http://localhost:1".to_string())
        .finish()?;
    let saved = report.with_patient_id("PATIENT_SAVED");
    repository.cache_mut().save(&saved)?;

    let reopened = ReportRepository::builder()
        .with_cache_folder(tempdir.path().to_path_buf())
        .finish()?;
    assert_eq!(reopened.cache().get("PATIENT_SAVED"), Some(saved));
    assert!(tempdir.path().join("reports/pharmaguard_PATIENT_SAVED.json").exists());
    Ok(())
}
