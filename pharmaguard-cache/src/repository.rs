//! Produce or reuse the report for a drug.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use pharmaguard_core::{AnnotationFile, Report};

use super::consts::{DEFAULT_REPORT_SUBFOLDER, GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE};
use super::failure::AnalysisFailure;
use super::ids::generate_patient_id;
use super::service::{AnalysisService, HttpAnalysisService, ServiceResponse};
use super::store::{ReportCache, ReportCacheStore};
use super::substrate::FileStore;
use super::utils::{expand_folder, get_default_api, get_default_cache_folder};

///
/// Where the current analysis stands.
///
/// `Idle -> Requesting -> {Delivered, Failed}`; a new request starts over
/// from `Requesting`.
///
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Requesting,
    Delivered(Report),
    Failed(AnalysisFailure),
}

impl AnalysisState {
    pub fn report(&self) -> Option<&Report> {
        match self {
            AnalysisState::Delivered(report) => Some(report),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match self {
            AnalysisState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Builder for a file-backed, HTTP-connected [`ReportRepository`].
///
/// ```rust,no_run
/// use pharmaguard_cache::repository::ReportRepository;
/// use std::path::PathBuf;
///
/// # fn main() -> anyhow::Result<()> {
/// let repository = ReportRepository::builder()
///     .with_cache_folder(PathBuf::from("/custom/cache"))
///     .with_api("http://localhost:8000".to_string())
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ReportRepositoryBuilder {
    cache_folder: Option<PathBuf>,
    api: Option<String>,
}

impl ReportRepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache folder; reports go in its `reports/` subfolder.
    pub fn with_cache_folder(mut self, path: PathBuf) -> Self {
        self.cache_folder = Some(path);
        self
    }

    /// Sets the analysis service base URL.
    pub fn with_api(mut self, api: String) -> Self {
        self.api = Some(api);
        self
    }

    /// Consumes the builder and opens the cache folder.
    pub fn finish(self) -> Result<ReportRepository<ReportCache<FileStore>, HttpAnalysisService>> {
        let cache_folder = expand_folder(self.cache_folder.unwrap_or_else(get_default_cache_folder));
        let report_folder = cache_folder.join(DEFAULT_REPORT_SUBFOLDER);
        let substrate = FileStore::new(report_folder.clone()).with_context(|| {
            format!("Can't open report cache at {}", report_folder.display())
        })?;

        let api = self.api.unwrap_or_else(get_default_api);
        debug!("Report cache at {}, service at {}", report_folder.display(), api);

        Ok(ReportRepository::new(
            ReportCache::new(substrate),
            HttpAnalysisService::new(&api),
        ))
    }
}

///
/// Runs the cache-or-fetch policy and holds the resulting state.
///
/// Failures are never retried; calling [`ReportRepository::request`] again is
/// the retry.
///
pub struct ReportRepository<C: ReportCacheStore, A: AnalysisService> {
    cache: C,
    service: A,
    state: AnalysisState,
}

impl ReportRepository<ReportCache<FileStore>, HttpAnalysisService> {
    pub fn builder() -> ReportRepositoryBuilder {
        ReportRepositoryBuilder::default()
    }
}

impl<C: ReportCacheStore, A: AnalysisService> ReportRepository<C, A> {
    pub fn new(cache: C, service: A) -> Self {
        ReportRepository {
            cache,
            service,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    ///
    /// Produce the report for `drug`.
    ///
    /// Without a file, a report cached under the drug name is reused. With a
    /// file, the service is always asked and a successful report is given a
    /// new patient id and cached under it.
    ///
    /// # Arguments
    /// - drug: drug name as entered
    /// - file: the annotation file to analyze, if one was selected
    ///
    /// # Returns
    /// - the new state, `Delivered` or `Failed`
    pub fn request(&mut self, drug: &str, file: Option<&AnnotationFile>) -> &AnalysisState {
        self.state = AnalysisState::Requesting;

        let next = match file {
            None => self.reuse(drug),
            Some(file) => self.analyze(drug, file),
        };

        match &next {
            AnalysisState::Delivered(report) => info!(
                "Delivered {} report {}",
                report.drug,
                report.patient_id.as_deref().unwrap_or("(cached)")
            ),
            AnalysisState::Failed(failure) => warn!("Analysis of {} failed: {}", drug, failure),
            _ => {}
        }
        self.state = next;
        &self.state
    }

    fn reuse(&self, drug: &str) -> AnalysisState {
        match self.cache.get(drug) {
            Some(report) => {
                info!("Using cached report for {}", drug);
                AnalysisState::Delivered(report)
            }
            None => AnalysisState::Failed(AnalysisFailure::new(format!(
                "{} {}",
                NO_FILE_MESSAGE, drug
            ))),
        }
    }

    fn analyze(&mut self, drug: &str, file: &AnnotationFile) -> AnalysisState {
        self.evict_drug_key(drug);

        let response = match self.service.analyze(file, drug) {
            Ok(response) => response,
            Err(e) => return AnalysisState::Failed(AnalysisFailure::new(e.to_string())),
        };

        match response {
            ServiceResponse::Error { message } => AnalysisState::Failed(AnalysisFailure::new(
                message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            )),
            ServiceResponse::Report(report) => {
                let report = report.with_patient_id(generate_patient_id());
                if let Err(e) = self.cache.save(&report) {
                    warn!("Report delivered but not cached: {}", e);
                }
                self.evict_drug_key(drug);
                AnalysisState::Delivered(report)
            }
        }
    }

    /// Drop a report cached under the bare drug name.
    fn evict_drug_key(&mut self, drug: &str) {
        if let Err(e) = self.cache.remove(drug) {
            warn!("Can't clear cached report for {}: {}", drug, e);
        }
    }
}
