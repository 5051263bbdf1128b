//! # Pharmacogene variant extraction
//!
//! Scans VCF annotation text line by line and keeps the data lines whose
//! `GENE=` INFO entry names one of the six panel genes. The scan is best
//! effort: meta lines, lines before the column header, short lines and
//! off-panel genes are dropped without complaint. Only a failure to read the
//! input at all is reported.

pub mod errors;
pub mod extract;

pub use errors::ExtractError;
pub use extract::{
    ExtractStats, VariantExtractor, extract, extract_from_path, extract_with_stats,
};
