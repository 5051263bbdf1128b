use anyhow::{Result, anyhow};
use clap::ArgMatches;
use tabled::Table;

use pharmaguard_cache::store::ReportCacheStore;
use pharmaguard_metrics::{gene_info, variant_rows};

use crate::open_repository;

pub fn run_genetics(matches: &ArgMatches) -> Result<()> {
    let repository = open_repository(matches)?;
    let cache = repository.cache();

    let report = match matches.get_one::<String>("patient-id") {
        Some(patient_id) => cache
            .get(patient_id)
            .ok_or_else(|| anyhow!("No cached report for {}", patient_id))?,
        None => cache
            .get_latest()
            .ok_or_else(|| anyhow!("No cached reports. Run `pharmaguard analyze` first."))?,
    };

    let profile = &report.pharmacogenomic_profile;
    let info = gene_info(&profile.primary_gene);
    println!("Gene: {}", profile.primary_gene);
    println!("Diplotype: {}", profile.diplotype);
    println!("Phenotype: {}", profile.phenotype);
    println!("Function: {}", info.function);
    println!("Role: {}", info.role);
    println!();

    let query = matches.get_one::<String>("query").map(String::as_str);
    let rows = variant_rows(&report, query);

    if rows.is_empty() {
        println!("No matching variants.");
    } else {
        let n = rows.len();
        println!("{}", Table::new(rows));
        println!("Variants shown: {}", n);
    }
    Ok(())
}
