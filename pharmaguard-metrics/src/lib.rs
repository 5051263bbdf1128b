//! Derived display values for pharmaguard risk reports.
//!
//! Everything here is a pure function of a [`Report`](pharmaguard_core::Report)
//! or one of its fields:
//!
//! - confidence buckets, compatibility scores and alert/warning flags
//! - the genetics detail view (gene overview, per-variant zygosity and impact)
//! - plain-text and JSON export helpers
//!
//! # Example
//!
//! ```no_run
//! use pharmaguard_metrics::{ReportMetrics, confidence_bucket};
//! # fn demo(report: &pharmaguard_core::Report) {
//! assert_eq!(confidence_bucket(0.9).as_str(), "Very High");
//! println!("{}", report.compatibility_score());
//! # }
//! ```

pub mod export;
pub mod genetics;
pub mod metrics;

// re-exports
pub use export::{render_json_report, render_text_report};
pub use genetics::{GeneInfo, VariantRow, gene_info, variant_rows};
pub use metrics::{
    ConfidenceBucket, KpiSummary, ReportMetrics, alert_flag, compatibility_score,
    confidence_bucket, confidence_percent, severity, warning_flag,
};
