//! Line oriented VCF scanning restricted to the pharmacogene panel.

use std::path::Path;

use log::debug;
use pharmaguard_core::models::variant::info_gene;
use pharmaguard_core::{AnnotationFile, PharmacoGene, VariantRecord};

use crate::errors::ExtractError;

/// Meta lines (`##fileformat=...`) start with two markers.
const META_PREFIX: &str = "##";
/// The column header line (`#CHROM POS ...`) starts with one.
const HEADER_PREFIX: char = '#';
/// CHROM POS ID REF ALT QUAL FILTER INFO FORMAT SAMPLE
const MIN_COLUMNS: usize = 10;
const INFO_COLUMN: usize = 7;

/// Counters describing what a scan kept and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines_seen: usize,
    pub header_seen: bool,
    /// data lines seen before the column header
    pub before_header: usize,
    /// data lines with fewer than ten columns
    pub malformed: usize,
    /// data lines without a `GENE=` entry or with a gene outside the panel
    pub off_panel: usize,
    pub retained: usize,
}

///
/// Incremental scanner: feed it lines in file order and it hands back the
/// records worth keeping.
///
/// The only state is whether the column header has gone by, so a fresh
/// extractor per input gives the same ordered output for the same text.
///
#[derive(Debug, Default)]
pub struct VariantExtractor {
    stats: ExtractStats,
}

impl VariantExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Process one line of annotation text.
    ///
    /// # Arguments
    /// - line: a single line, with or without its trailing newline
    ///
    /// # Returns
    /// - the record for this line, if it is a panel-gene data line
    pub fn push_line(&mut self, line: &str) -> Option<VariantRecord> {
        self.stats.lines_seen += 1;
        let line = line.trim_end_matches(['\n', '\r']);

        if line.starts_with(META_PREFIX) {
            return None;
        }
        if line.starts_with(HEADER_PREFIX) {
            self.stats.header_seen = true;
            return None;
        }
        if !self.stats.header_seen {
            self.stats.before_header += 1;
            return None;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < MIN_COLUMNS {
            self.stats.malformed += 1;
            return None;
        }

        let gene = match info_gene(columns[INFO_COLUMN]).and_then(|g| g.parse::<PharmacoGene>().ok()) {
            Some(gene) => gene,
            None => {
                self.stats.off_panel += 1;
                return None;
            }
        };

        self.stats.retained += 1;
        Some(VariantRecord {
            chromosome: columns[0].to_string(),
            position: columns[1].to_string(),
            id: columns[2].to_string(),
            reference_allele: columns[3].to_string(),
            alternate_allele: columns[4].to_string(),
            gene,
            quality: columns[5].to_string(),
            filter_status: columns[6].to_string(),
            info_raw: columns[INFO_COLUMN].to_string(),
            format_spec: columns[8].to_string(),
            sample_field: columns[9].to_string(),
        })
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }
}

///
/// Extract the panel-gene variant records from annotation text.
///
/// Never fails: every line that cannot produce a record is dropped. Output
/// order follows input order.
pub fn extract(text: &str) -> Vec<VariantRecord> {
    extract_with_stats(text).0
}

/// Same as [`extract`], also returning what was dropped and why.
pub fn extract_with_stats(text: &str) -> (Vec<VariantRecord>, ExtractStats) {
    let mut extractor = VariantExtractor::new();
    let records = text
        .lines()
        .filter_map(|line| extractor.push_line(line))
        .collect();
    let stats = extractor.stats();
    debug!(
        "Scanned {} lines: {} retained, {} malformed, {} off panel, {} before header",
        stats.lines_seen, stats.retained, stats.malformed, stats.off_panel, stats.before_header
    );
    (records, stats)
}

///
/// Extract records from a file on disk, plain or gzipped.
///
/// The file is loaded exactly as an upload would be: the size limit is checked
/// before reading and gzip is recognised by content, not by file name.
///
/// # Arguments
/// - path: path to the VCF file
pub fn extract_from_path(path: &Path) -> Result<Vec<VariantRecord>, ExtractError> {
    let file = AnnotationFile::from_path(path)?;
    Ok(extract(&file.text()?))
}
