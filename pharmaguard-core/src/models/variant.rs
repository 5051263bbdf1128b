use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{INFO_GENE_KEY, INFO_STAR_KEY};

///
/// The pharmacogenes of the fixed panel. A gene symbol that does not parse
/// into one of these is outside the panel.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum PharmacoGene {
    CYP2D6,
    CYP2C19,
    CYP2C9,
    SLCO1B1,
    TPMT,
    DPYD,
}

impl PharmacoGene {
    pub fn as_str(&self) -> &'static str {
        match self {
            PharmacoGene::CYP2D6 => "CYP2D6",
            PharmacoGene::CYP2C19 => "CYP2C19",
            PharmacoGene::CYP2C9 => "CYP2C9",
            PharmacoGene::SLCO1B1 => "SLCO1B1",
            PharmacoGene::TPMT => "TPMT",
            PharmacoGene::DPYD => "DPYD",
        }
    }
}

impl FromStr for PharmacoGene {
    type Err = String;

    /// Gene symbols are matched exactly; `cyp2d6` is not on the panel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CYP2D6" => Ok(PharmacoGene::CYP2D6),
            "CYP2C19" => Ok(PharmacoGene::CYP2C19),
            "CYP2C9" => Ok(PharmacoGene::CYP2C9),
            "SLCO1B1" => Ok(PharmacoGene::SLCO1B1),
            "TPMT" => Ok(PharmacoGene::TPMT),
            "DPYD" => Ok(PharmacoGene::DPYD),
            _ => Err(format!("{} is not a panel gene", s)),
        }
    }
}

impl Display for PharmacoGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// One retained data line of an annotation file.
///
/// Every column is kept as the raw text found in the file, including the
/// position, so nothing is lost to numeric conversion. The gene is the only
/// typed field: a record can only exist for a panel gene.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: String,
    pub id: String,
    pub reference_allele: String,
    pub alternate_allele: String,
    pub gene: PharmacoGene,
    pub quality: String,
    pub filter_status: String,
    pub info_raw: String,
    pub format_spec: String,
    pub sample_field: String,
}

impl VariantRecord {
    ///
    /// Look up a `KEY=value` entry of the INFO column.
    ///
    /// # Arguments
    /// - key: the INFO key, e.g. `STAR`
    pub fn info_value(&self, key: &str) -> Option<&str> {
        info_lookup(&self.info_raw, key)
    }

    /// The star allele (`STAR=` INFO key), if annotated.
    pub fn star_allele(&self) -> Option<&str> {
        self.info_value(INFO_STAR_KEY)
    }

    /// The genotype call: first `:`-separated token of the sample column.
    pub fn genotype(&self) -> Option<&str> {
        self.sample_field
            .split(':')
            .next()
            .filter(|gt| !gt.is_empty())
    }

    pub fn rsid(&self) -> &str {
        &self.id
    }
}

///
/// Find the value of `key` in a `;`-separated INFO column. Entries without a
/// `=` are flags and never match.
///
pub fn info_lookup<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info.split(';')
        .filter_map(|item| item.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Convenience for the gene symbol carried by an INFO column.
pub fn info_gene(info: &str) -> Option<&str> {
    info_lookup(info, INFO_GENE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn record() -> VariantRecord {
        VariantRecord {
            chromosome: "chr22".to_string(),
            position: "42522613".to_string(),
            id: "rs3892097".to_string(),
            reference_allele: "G".to_string(),
            alternate_allele: "A".to_string(),
            gene: PharmacoGene::CYP2D6,
            quality: ".".to_string(),
            filter_status: "PASS".to_string(),
            info_raw: "GENE=CYP2D6;STAR=*4;DB".to_string(),
            format_spec: "GT:DP".to_string(),
            sample_field: "1/1:32".to_string(),
        }
    }

    #[rstest]
    fn test_derived_fields(record: VariantRecord) {
        assert_eq!(record.star_allele(), Some("*4"));
        assert_eq!(record.genotype(), Some("1/1"));
        assert_eq!(record.rsid(), "rs3892097");
        assert_eq!(record.info_value("DB"), None);
    }

    #[rstest]
    #[case("GENE=TPMT", Some("TPMT"))]
    #[case("STAR=*3A;GENE=TPMT", Some("TPMT"))]
    #[case("GENES=TPMT", None)]
    #[case(".", None)]
    fn test_info_gene(#[case] info: &str, #[case] expected: Option<&str>) {
        assert_eq!(info_gene(info), expected);
    }

    #[rstest]
    fn test_gene_parse() {
        assert_eq!("CYP2C19".parse::<PharmacoGene>(), Ok(PharmacoGene::CYP2C19));
        assert!("BRCA1".parse::<PharmacoGene>().is_err());
        assert!("cyp2d6".parse::<PharmacoGene>().is_err());
        assert_eq!(PharmacoGene::SLCO1B1.to_string(), "SLCO1B1");
    }
}
