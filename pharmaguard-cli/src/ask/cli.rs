pub use pharmaguard_cache::consts::ASK_CMD;
use clap::{Arg, Command};

pub fn create_ask_cli() -> Command {
    Command::new(ASK_CMD)
        .about("Ask the assistant a question about the latest cached report")
        .arg(
            Arg::new("message")
                .long("message")
                .short('m')
                .required(true)
                .help("Your question"),
        )
}
