//! Genetics detail view: gene overview and per-variant rows of a report.

use pharmaguard_core::{DetectedVariant, PharmacoGene, Report};
use serde::Serialize;
use tabled::Tabled;

const NOT_AVAILABLE: &str = "N/A";

/// What a panel gene does, for the gene overview panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneInfo {
    pub function: &'static str,
    pub role: &'static str,
}

///
/// Describe a gene by symbol. Anything off the panel is `N/A`.
///
pub fn gene_info(gene: &str) -> GeneInfo {
    match gene.parse::<PharmacoGene>() {
        Ok(PharmacoGene::CYP2D6) => GeneInfo {
            function: "Cytochrome P450 2D6 enzyme",
            role: "Metabolizes many drugs including opioids and antidepressants",
        },
        Ok(PharmacoGene::CYP2C19) => GeneInfo {
            function: "Cytochrome P450 2C19 enzyme",
            role: "Activates/metabolizes drugs like clopidogrel and PPIs",
        },
        Ok(PharmacoGene::CYP2C9) => GeneInfo {
            function: "Cytochrome P450 2C9 enzyme",
            role: "Metabolizes warfarin and other drugs",
        },
        Ok(PharmacoGene::SLCO1B1) => GeneInfo {
            function: "Solute carrier organic anion transporter family member 1B1",
            role: "Hepatic uptake transporter affecting statin exposure",
        },
        Ok(PharmacoGene::TPMT) => GeneInfo {
            function: "Thiopurine methyltransferase enzyme",
            role: "Responsible for thiopurine (e.g., azathioprine) metabolism",
        },
        Ok(PharmacoGene::DPYD) => GeneInfo {
            function: "Dihydropyrimidine dehydrogenase enzyme",
            role: "Key enzyme for fluoropyrimidine (e.g., 5-FU) metabolism",
        },
        Err(_) => GeneInfo {
            function: NOT_AVAILABLE,
            role: NOT_AVAILABLE,
        },
    }
}

/// Name a genotype call. Unrecognised calls are shown as-is.
pub fn normalize_zygosity(genotype: Option<&str>) -> String {
    match genotype {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some("1/1") => "Homozygous".to_string(),
        Some("0/1") | Some("1/0") => "Heterozygous".to_string(),
        Some("0/0") => "Wild-type".to_string(),
        Some(other) => other.to_string(),
    }
}

///
/// Guess the functional impact of a star allele from its annotation text.
///
/// The `lo` check is deliberately loose and also catches `loss`.
pub fn infer_impact_from_star(star: Option<&str>) -> String {
    let star = match star {
        None | Some("") => return NOT_AVAILABLE.to_string(),
        Some(star) => star.to_lowercase(),
    };

    if star.contains("loss") || star.contains("lo") {
        "Loss-of-function".to_string()
    } else if star.contains("decreased") {
        "Decreased function".to_string()
    } else if star.contains("increased") {
        "Increased function".to_string()
    } else {
        "Variant effect depends on allele definition".to_string()
    }
}

/// One row of the variant details table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tabled)]
pub struct VariantRow {
    pub rsid: String,
    pub star: String,
    pub genotype: String,
    pub zygosity: String,
    pub impact: String,
}

impl VariantRow {
    ///
    /// Build a row, falling back across the field names different service
    /// versions have used.
    ///
    /// # Arguments
    /// - variant: the reported variant
    /// - index: zero-based position, used to name variants without an id
    pub fn from_variant(variant: &DetectedVariant, index: usize) -> Self {
        let rsid = variant
            .rsid
            .clone()
            .or_else(|| first_extra(variant, &["rsID", "id"]))
            .unwrap_or_else(|| format!("variant_{}", index + 1));

        let star_raw = variant
            .star
            .clone()
            .or_else(|| first_extra(variant, &["star_allele"]));
        let star = star_raw
            .clone()
            .or_else(|| first_extra(variant, &["allele"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let genotype_raw = variant
            .genotype
            .clone()
            .or_else(|| first_extra(variant, &["zygosity"]));
        let genotype = genotype_raw
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let zygosity = normalize_zygosity(genotype_raw.as_deref());

        let impact = variant
            .functional_impact
            .clone()
            .or_else(|| first_extra(variant, &["impact"]))
            .unwrap_or_else(|| infer_impact_from_star(star_raw.as_deref()));

        VariantRow {
            rsid,
            star,
            genotype,
            zygosity,
            impact,
        }
    }

    /// Case-insensitive substring match over every column.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.rsid, &self.star, &self.genotype, &self.zygosity, &self.impact]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

fn first_extra(variant: &DetectedVariant, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| variant.extra_str(key))
        .map(str::to_string)
}

///
/// Rows for the detected variants of a report, optionally filtered.
///
/// # Arguments
/// - report: the report to show
/// - query: search text; blank means no filtering
pub fn variant_rows(report: &Report, query: Option<&str>) -> Vec<VariantRow> {
    let rows = report
        .pharmacogenomic_profile
        .detected_variants
        .iter()
        .enumerate()
        .map(|(idx, v)| VariantRow::from_variant(v, idx));

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => rows.filter(|row| row.matches(q)).collect(),
        None => rows.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn report() -> Report {
        serde_json::from_value(json!({
            "patient_id": "PATIENT_1",
            "drug": "clopidogrel",
            "timestamp": "2026-02-19T10:11:12",
            "risk_assessment": {"risk_label": "Ineffective", "confidence_score": 0.95},
            "pharmacogenomic_profile": {
                "primary_gene": "CYP2C19",
                "diplotype": "*2/*2",
                "phenotype": "Poor metabolizer",
                "detected_variants": [
                    {"rsid": "rs4244285", "star": "*2", "genotype": "1/1"},
                    {"rsID": "rs12248560", "star_allele": "*17 increased", "zygosity": "0/1"},
                    {"allele": "*3", "impact": "No function"}
                ]
            },
            "clinical_recommendation": {"recommendation": "Use alternative antiplatelet", "evidence": "CPIC Level A"},
            "llm_generated_explanation": {"summary": "Poor metabolizer."}
        }))
        .unwrap()
    }

    #[rstest]
    fn test_rows_fall_back_across_field_names(report: Report) {
        let rows = variant_rows(&report, None);
        assert_eq!(
            rows,
            vec![
                VariantRow {
                    rsid: "rs4244285".to_string(),
                    star: "*2".to_string(),
                    genotype: "1/1".to_string(),
                    zygosity: "Homozygous".to_string(),
                    impact: "Variant effect depends on allele definition".to_string(),
                },
                VariantRow {
                    rsid: "rs12248560".to_string(),
                    star: "*17 increased".to_string(),
                    genotype: "0/1".to_string(),
                    zygosity: "Heterozygous".to_string(),
                    impact: "Increased function".to_string(),
                },
                VariantRow {
                    rsid: "variant_3".to_string(),
                    star: "*3".to_string(),
                    genotype: "N/A".to_string(),
                    zygosity: "N/A".to_string(),
                    impact: "No function".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case(Some("HOMO"), 1)]
    #[case(Some("rs"), 2)]
    #[case(Some("   "), 3)]
    #[case(None, 3)]
    #[case(Some("nothing-like-this"), 0)]
    fn test_row_query(report: Report, #[case] query: Option<&str>, #[case] expected: usize) {
        assert_eq!(variant_rows(&report, query).len(), expected);
    }

    #[rstest]
    #[case(Some("1/1"), "Homozygous")]
    #[case(Some("1/0"), "Heterozygous")]
    #[case(Some("0/0"), "Wild-type")]
    #[case(Some("1|1"), "1|1")]
    #[case(None, "N/A")]
    fn test_normalize_zygosity(#[case] genotype: Option<&str>, #[case] expected: &str) {
        assert_eq!(normalize_zygosity(genotype), expected);
    }

    #[rstest]
    #[case(Some("Loss"), "Loss-of-function")]
    #[case(Some("*2 (low activity)"), "Loss-of-function")]
    #[case(Some("decreased"), "Decreased function")]
    #[case(Some("*4"), "Variant effect depends on allele definition")]
    #[case(None, "N/A")]
    fn test_infer_impact(#[case] star: Option<&str>, #[case] expected: &str) {
        assert_eq!(infer_impact_from_star(star), expected);
    }

    #[rstest]
    fn test_gene_info() {
        assert_eq!(gene_info("TPMT").function, "Thiopurine methyltransferase enzyme");
        assert_eq!(gene_info("N/A"), GeneInfo { function: "N/A", role: "N/A" });
    }
}
