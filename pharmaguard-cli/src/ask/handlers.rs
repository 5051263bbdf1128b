use anyhow::{Result, anyhow};
use clap::ArgMatches;

use pharmaguard_cache::assistant::{ChatRole, Conversation, HttpAssistant};
use pharmaguard_cache::store::ReportCacheStore;

use crate::open_repository;

pub fn run_ask(matches: &ArgMatches) -> Result<()> {
    let message = matches
        .get_one::<String>("message")
        .expect("A message is required.");

    let repository = open_repository(matches)?;
    let report = repository
        .cache()
        .get_latest()
        .ok_or_else(|| anyhow!("No cached reports. Run `pharmaguard analyze` first."))?;

    let assistant = HttpAssistant::from_env()?;
    let mut conversation = Conversation::open(&report);
    conversation.send(message, &assistant);

    for turn in conversation.transcript() {
        let speaker = match turn.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        };
        println!("{}: {}", speaker, turn.content);
    }
    Ok(())
}
