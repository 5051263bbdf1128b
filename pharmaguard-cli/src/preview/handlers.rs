use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tabled::{Table, Tabled};

use pharmaguard_core::{AnnotationFile, VariantRecord};
use pharmaguard_vcf::extract_with_stats;

#[derive(Tabled)]
struct PreviewRow {
    chrom: String,
    pos: String,
    rsid: String,
    gene: String,
    star: String,
    genotype: String,
}

impl From<&VariantRecord> for PreviewRow {
    fn from(record: &VariantRecord) -> Self {
        PreviewRow {
            chrom: record.chromosome.clone(),
            pos: record.position.clone(),
            rsid: record.rsid().to_string(),
            gene: record.gene.to_string(),
            star: record.star_allele().unwrap_or("-").to_string(),
            genotype: record.genotype().unwrap_or("-").to_string(),
        }
    }
}

/// Extract and print the panel variants of a local file.
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_preview(matches: &ArgMatches) -> Result<()> {
    let vcf = matches
        .get_one::<String>("vcf")
        .expect("A path to a VCF file is required.");

    let file = AnnotationFile::from_path(Path::new(vcf))
        .with_context(|| format!("Can't load {}", vcf))?;
    let text = file.text()?;
    let (records, stats) = extract_with_stats(&text);

    if records.is_empty() {
        println!("No pharmacogene variants found in {}", file.name);
    } else {
        let rows: Vec<PreviewRow> = records.iter().map(PreviewRow::from).collect();
        println!("{}", Table::new(rows));
    }

    println!("Variants found: {}", records.len());
    if !stats.header_seen {
        println!("Warning: no #CHROM header line; every data line was ignored.");
    }
    Ok(())
}
