//! Command-line surface.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jobchat",
    about = "Conversational job-search assistant",
    version
)]
pub struct Cli {
    /// The message to send to the assistant
    pub question: Option<String>,

    /// Replay a prior transcript (JSON file) as conversation context
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Write the completed transcript to a JSON file for later replay
    #[arg(long, value_name = "FILE")]
    pub save_transcript: Option<PathBuf>,

    /// Wait for the full answer instead of streaming it
    #[arg(long)]
    pub buffered: bool,

    /// Emit raw JSON-line event frames on stdout
    #[arg(long, conflicts_with = "buffered")]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a config file (overrides discovery)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip config files entirely, use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// List the available tools and exit
    #[arg(long)]
    pub list_tools: bool,
}
