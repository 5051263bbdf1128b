//! Constants shared by every pharmaguard crate.

use crate::models::PharmacoGene;

/// The six pharmacogenes recognised by pharmaguard. Variant records for any
/// other gene are never materialized.
pub const GENE_PANEL: [PharmacoGene; 6] = [
    PharmacoGene::CYP2D6,
    PharmacoGene::CYP2C19,
    PharmacoGene::CYP2C9,
    PharmacoGene::SLCO1B1,
    PharmacoGene::TPMT,
    PharmacoGene::DPYD,
];

/// Key prefix separating pharmaguard entries from anything else living in the
/// same key-value store.
pub const NAMESPACE_PREFIX: &str = "pharmaguard_";

/// Largest annotation file accepted for preview or upload (5 MB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Drugs the analysis service has rules for, paired with the gene driving them.
pub const SUPPORTED_DRUGS: [(&str, PharmacoGene); 6] = [
    ("CODEINE", PharmacoGene::CYP2D6),
    ("WARFARIN", PharmacoGene::CYP2C9),
    ("CLOPIDOGREL", PharmacoGene::CYP2C19),
    ("SIMVASTATIN", PharmacoGene::SLCO1B1),
    ("AZATHIOPRINE", PharmacoGene::TPMT),
    ("FLUOROURACIL", PharmacoGene::DPYD),
];

/// INFO key carrying the gene symbol.
pub const INFO_GENE_KEY: &str = "GENE";

/// INFO key carrying the star allele.
pub const INFO_STAR_KEY: &str = "STAR";

/// Look up the primary gene for a supported drug, case-insensitively.
pub fn gene_for_drug(drug: &str) -> Option<PharmacoGene> {
    SUPPORTED_DRUGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(drug.trim()))
        .map(|(_, gene)| *gene)
}
