//! Interactive REPL for planning a trip
//!
//! Walks the preference form, then hands free text and slash commands to a
//! [`TripSession`](crate::planner::TripSession).

mod command;
mod form;
mod session;

pub use command::{Command, stage_hint};
pub use form::{FormReader, choice_listing, is_clear_token, numbered_options, parse_interests, resolve_choice};
pub use session::ReplSession;

use std::path::PathBuf;

use eyre::Result;

use crate::config::Config;
use crate::llm::create_client;
use crate::planner::{SessionSettings, TripSession};
use crate::prompts::PromptLoader;
use crate::search::create_search_client;

/// Run the interactive REPL
///
/// This is the main entry point for `tp plan`.
pub async fn run_interactive(config: &Config, destination: Option<String>, export_dir: Option<PathBuf>) -> Result<()> {
    config.validate()?;

    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let search =
        create_search_client(&config.search).map_err(|e| eyre::eyre!("Failed to create search client: {}", e))?;

    let root = std::env::current_dir()?;
    let session = TripSession::new(llm, search, PromptLoader::new(&root), SessionSettings::from_config(config));

    let export_dir = export_dir.unwrap_or_else(|| config.planner.export_dir.clone());
    let mut repl = ReplSession::new(session, export_dir);
    if let Some(destination) = destination {
        repl.set_destination(destination);
    }
    repl.run().await
}
