pub use pharmaguard_cache::consts::PREVIEW_CMD;
use clap::{Arg, Command};

pub fn create_preview_cli() -> Command {
    Command::new(PREVIEW_CMD)
        .about("List the pharmacogene variants found in a VCF file, without contacting the service")
        .arg(
            Arg::new("vcf")
                .long("vcf")
                .short('v')
                .required(true)
                .help("Path to a VCF file (plain or gzipped, at most 5 MB)"),
        )
}
