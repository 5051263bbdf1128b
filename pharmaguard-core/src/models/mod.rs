pub mod report;
pub mod upload;
pub mod variant;

// re-export for cleaner imports
pub use self::report::{
    ClinicalRecommendation, DetectedVariant, Explanation, PharmacogenomicProfile, QualityMetrics,
    Report, RiskAssessment, RiskLabel,
};
pub use self::upload::AnnotationFile;
pub use self::variant::{PharmacoGene, VariantRecord};
