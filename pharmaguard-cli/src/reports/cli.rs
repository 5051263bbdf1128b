pub use pharmaguard_cache::consts::REPORTS_CMD;
use clap::{Arg, Command};
use pharmaguard_cache::consts::{
    REPORTS_CLEAR, REPORTS_LATEST, REPORTS_LIST, REPORTS_REMOVE, REPORTS_SHOW,
};

fn patient_arg() -> Arg {
    Arg::new("patient-id")
        .long("patient-id")
        .short('p')
        .required(true)
        .help("Patient identifier of a cached report")
}

pub fn create_reports_cli() -> Command {
    Command::new(REPORTS_CMD)
        .about("Inspect and evict cached reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(REPORTS_LIST).about("List cached reports, newest first"))
        .subcommand(Command::new(REPORTS_LATEST).about("Show the most recent cached report"))
        .subcommand(
            Command::new(REPORTS_SHOW)
                .about("Print the text report for a patient")
                .arg(patient_arg()),
        )
        .subcommand(
            Command::new(REPORTS_REMOVE)
                .about("Remove the cached report for a patient")
                .arg(patient_arg()),
        )
        .subcommand(Command::new(REPORTS_CLEAR).about("Remove every cached report"))
}
