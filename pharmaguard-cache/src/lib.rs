//! # pharmaguard-cache
//!
//! Everything between a selected annotation file and a displayed report:
//!
//! - [`substrate`]: the persisted string key-value store (in memory or a folder of files)
//! - [`store`]: the namespaced report cache on top of it
//! - [`service`]: the remote analysis service
//! - [`assistant`]: the remote conversational assistant
//! - [`repository`]: the cache-or-fetch policy that produces the current report
//!
//! ```rust,no_run
//! use pharmaguard_cache::repository::ReportRepository;
//! use pharmaguard_core::AnnotationFile;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut repository = ReportRepository::builder().finish()?;
//! let file = AnnotationFile::from_path(Path::new("sample_patient.vcf"))?;
//! let state = repository.request("codeine", Some(&file));
//! println!("{:?}", state);
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod consts;
pub mod errors;
pub mod failure;
pub mod ids;
pub mod repository;
pub mod service;
pub mod store;
pub mod substrate;
pub mod utils;

pub use errors::{CacheError, ServiceError};
pub use failure::{AnalysisFailure, FailureKind};
pub use repository::{AnalysisState, ReportRepository};
pub use store::{ReportCache, ReportCacheStore};
pub use substrate::{FileStore, KeyValueStore, MemoryStore};
