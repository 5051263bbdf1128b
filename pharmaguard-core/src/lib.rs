//! # pharmaguard-core
//!
//! Shared data model for the pharmaguard crates: the variant records pulled out of
//! an annotation (VCF) file, the risk report returned by the analysis service, the
//! fixed pharmacogene panel, and the readers used to load user supplied input.

pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use consts::{GENE_PANEL, MAX_UPLOAD_BYTES, NAMESPACE_PREFIX};
pub use errors::InputError;
pub use models::{
    AnnotationFile, ClinicalRecommendation, DetectedVariant, Explanation, PharmacoGene,
    PharmacogenomicProfile, QualityMetrics, Report, RiskAssessment, RiskLabel, VariantRecord,
};
