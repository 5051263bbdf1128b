mod analyze;
mod ask;
mod genetics;
mod preview;
mod reports;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharmaguard_cache::repository::ReportRepository;
use pharmaguard_cache::service::HttpAnalysisService;
use pharmaguard_cache::store::ReportCache;
use pharmaguard_cache::substrate::FileStore;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "pharmaguard";
    pub const CACHE_FOLDER_ARG: &str = "cache-folder";
    pub const API_ARG: &str = "api";
    pub const DEFAULT_LOG_FILTER: &str = "warn";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Pharmacogenomic risk analysis: preview VCF files, run analyses and browse cached reports.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::CACHE_FOLDER_ARG)
                .long(consts::CACHE_FOLDER_ARG)
                .short('f')
                .global(true)
                .help("Cache folder path (default: $PHARMAGUARD_CACHE or ~/.pharmaguard)"),
        )
        .arg(
            Arg::new(consts::API_ARG)
                .long(consts::API_ARG)
                .global(true)
                .help("Analysis service URL (default: $PHARMAGUARD_API or http://localhost:8000)"),
        )
        .subcommand(preview::cli::create_preview_cli())
        .subcommand(analyze::cli::create_analyze_cli())
        .subcommand(reports::cli::create_reports_cli())
        .subcommand(genetics::cli::create_genetics_cli())
        .subcommand(ask::cli::create_ask_cli())
}

/// Open the report repository using folder / service overrides from the command line.
pub fn open_repository(
    matches: &ArgMatches,
) -> Result<ReportRepository<ReportCache<FileStore>, HttpAnalysisService>> {
    let mut builder = ReportRepository::builder();
    if let Some(folder) = matches.get_one::<String>(consts::CACHE_FOLDER_ARG) {
        builder = builder.with_cache_folder(PathBuf::from(folder));
    }
    if let Some(api) = matches.get_one::<String>(consts::API_ARG) {
        builder = builder.with_api(api.to_string());
    }
    builder.finish()
}

fn init_logging() {
    // library crates log through `log`; the fmt layer picks those records up too
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(consts::DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // PREVIEW
        //
        Some((preview::cli::PREVIEW_CMD, matches)) => {
            preview::handlers::run_preview(matches)?;
        }

        //
        // ANALYZE
        //
        Some((analyze::cli::ANALYZE_CMD, matches)) => {
            analyze::handlers::run_analyze(matches)?;
        }

        //
        // REPORTS
        //
        Some((reports::cli::REPORTS_CMD, matches)) => {
            reports::handlers::run_reports(matches)?;
        }

        //
        // GENETICS
        //
        Some((genetics::cli::GENETICS_CMD, matches)) => {
            genetics::handlers::run_genetics(matches)?;
        }

        //
        // ASSISTANT
        //
        Some((ask::cli::ASK_CMD, matches)) => {
            ask::handlers::run_ask(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
