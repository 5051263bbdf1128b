pub use pharmaguard_cache::consts::GENETICS_CMD;
use clap::{Arg, Command};

pub fn create_genetics_cli() -> Command {
    Command::new(GENETICS_CMD)
        .about("Show the gene overview and detected variants of the latest cached report")
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .help("Only show variants matching this text (rsID, star allele, genotype, ...)"),
        )
        .arg(
            Arg::new("patient-id")
                .long("patient-id")
                .short('p')
                .help("Use this patient's report instead of the latest"),
        )
}
