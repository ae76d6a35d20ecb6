//! Config subcommand handlers.

use std::path::Path;

use summarizer_config::{ConfigError, ConfigLoader, ConfigValidator};

use crate::cli::ConfigAction;

/// Handle config subcommands.
pub(crate) fn handle_config_command(
    action: ConfigAction,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => config_check(path),
        ConfigAction::Show => config_show(path),
    }
}

fn config_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = match ConfigLoader::load(path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => {
            println!("{}: not found, built-in defaults apply", path.display());
            return Ok(());
        }
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                println!("error: {}: {}", error.path, error.message);
            }
            return Err(format!("{} configuration error(s) in {}", errors.len(), path.display()).into());
        }
        Err(e) => return Err(e.into()),
    };

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    println!("{}: OK", path.display());
    Ok(())
}

fn config_show(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
