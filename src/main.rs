//! Ollama summarizer
//!
//! Entry point for the operator CLI.

mod cli;
mod cmd_config;
mod cmd_lock;
mod cmd_process;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use summarizer_config::{summarizer_dir, Config, ConfigError, ConfigLoader};

use cli::{Cli, Commands};
use cmd_config::handle_config_command;
use cmd_lock::handle_lock_command;
use cmd_process::handle_process_command;

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.ollama-summarizer/logs/ with daily rotation.
/// Console output goes to stderr so stdout stays free for entry JSON.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = summarizer_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("ollama-summarizer")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true)
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
        )
        .init();

    Ok(())
}

/// Load an explicit config file, or the default one when present.
fn load_config(path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => ConfigLoader::load(path),
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ConfigLoader::default_path);

    match cli.command {
        Commands::Process(args) => {
            let config = load_config(cli.config.as_ref())?;
            handle_process_command(args, config).await
        }
        Commands::Config { action } => handle_config_command(action, &config_path),
        Commands::Lock { action } => {
            let config = load_config(cli.config.as_ref())?;
            handle_lock_command(action, &config)
        }
    }
}
