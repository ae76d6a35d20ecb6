//! CLI definitions for the summarizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Ollama summarizer CLI.
#[derive(Parser)]
#[command(name = "ollama-summarizer")]
#[command(about = "Enrich feed entries with browser-rendered content and Ollama summaries")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.ollama-summarizer/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Enrich one entry
    Process(ProcessArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Process lock commands
    Lock {
        #[command(subcommand)]
        action: LockAction,
    },
}

#[derive(Args)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["entry", "url"]))]
pub(crate) struct ProcessArgs {
    /// Entry JSON file
    pub entry: Option<PathBuf>,

    /// Build an entry from a bare article URL
    #[arg(long)]
    pub url: Option<String>,

    /// CSS selector for the article element
    #[arg(long)]
    pub selector: Option<String>,

    /// Re-enrich entries that were already processed
    #[arg(long)]
    pub force: bool,

    /// Apply the feed allowlist before processing
    #[arg(long)]
    pub admit: bool,

    /// Write the resulting entry here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate the configuration file
    Check,

    /// Print the effective configuration
    Show,
}

#[derive(Subcommand)]
pub(crate) enum LockAction {
    /// Show who holds the process lock
    Status,
}
