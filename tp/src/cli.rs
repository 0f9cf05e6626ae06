//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trip Planner - stage-based conversational travel itinerary planner
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip by chatting with an AI travel planner",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive planning session (default)
    Plan {
        /// Pre-fill the destination field
        #[arg(short, long)]
        destination: Option<String>,

        /// Directory itineraries are exported to
        #[arg(short, long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },

    /// List every choice the preference form accepts
    Choices,

    /// Print the effective configuration as YAML
    Config,
}

/// Get the path to the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
        .join("tripplanner.log")
}
