pub use pharmaguard_cache::consts::ANALYZE_CMD;
use clap::{Arg, ArgAction, Command};

pub fn create_analyze_cli() -> Command {
    Command::new(ANALYZE_CMD)
        .about("Analyze a VCF file for a drug, or reuse the report cached for that drug")
        .arg(
            Arg::new("vcf")
                .long("vcf")
                .short('v')
                .help("Path to a VCF file; omit to reuse a cached report"),
        )
        .arg(
            Arg::new("drug")
                .long("drug")
                .short('d')
                .required(true)
                .help("Drug name, e.g. codeine or warfarin"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the full report as JSON"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .short('e')
                .help("Folder to write the text and JSON report exports to"),
        )
}
