use anyhow::{Result, bail};
use clap::ArgMatches;

use pharmaguard_cache::consts::{
    REPORTS_CLEAR, REPORTS_LATEST, REPORTS_LIST, REPORTS_REMOVE, REPORTS_SHOW,
};
use pharmaguard_cache::store::ReportCacheStore;
use pharmaguard_cache::utils::print_reports;
use pharmaguard_metrics::render_text_report;

use crate::analyze::handlers::print_summary;
use crate::open_repository;

/// Execute a reports subcommand
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_reports(matches: &ArgMatches) -> Result<()> {
    let (subcmd, sub_matches) = matches
        .subcommand()
        .expect("A subcommand is required");

    let mut repository = open_repository(matches)?;
    let cache = repository.cache_mut();

    match subcmd {
        REPORTS_LIST => {
            let reports = cache.get_all();
            let n = reports.len();
            print_reports(&reports);
            println!("Number of reports: {}", n);
        }
        REPORTS_LATEST => match cache.get_latest() {
            Some(report) => print_summary(&report),
            None => println!("No cached reports."),
        },
        REPORTS_SHOW => {
            let patient_id = sub_matches
                .get_one::<String>("patient-id")
                .expect("A patient id is required");
            match cache.get(patient_id) {
                Some(report) => print!("{}", render_text_report(&report)),
                None => bail!("No cached report for {}", patient_id),
            }
        }
        REPORTS_REMOVE => {
            let patient_id = sub_matches
                .get_one::<String>("patient-id")
                .expect("A patient id is required");
            if cache.get(patient_id).is_none() {
                bail!("No cached report for {}", patient_id);
            }
            cache.remove(patient_id)?;
            println!("Removed {}", patient_id);
        }
        REPORTS_CLEAR => {
            let n = cache.get_all().len();
            cache.clear_all()?;
            println!("Removed {} cached reports", n);
        }
        _ => unreachable!("Unknown reports subcommand: {subcmd}"),
    }

    Ok(())
}
