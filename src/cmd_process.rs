//! Process subcommand handler.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use summarizer_config::Config;
use summarizer_core::EntryProcessor;
use summarizer_fetcher_chrome::ChromeFetcher;
use summarizer_lock::FileLock;
use summarizer_ollama::OllamaClient;
use summarizer_protocols::{Entry, Feed};

use crate::cli::ProcessArgs;

/// Run one entry through the pipeline and emit the resulting entry as JSON.
pub(crate) async fn handle_process_command(
    args: ProcessArgs,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut entry = match (&args.entry, &args.url) {
        (Some(path), _) => read_entry(path)?,
        (None, Some(url)) => entry_for_url(url),
        (None, None) => return Err("Either an entry file or --url is required".into()),
    };
    if let Some(selector) = &args.selector {
        apply_selector(&mut entry, selector);
    }

    let processor = EntryProcessor::new(
        &config,
        Arc::new(ChromeFetcher::new(&config.chrome)?),
        Arc::new(OllamaClient::new(&config.ollama)?),
        Arc::new(FileLock::new(&config.lock.path)),
    );

    let outcome = if args.admit {
        processor.admit(&mut entry).await?
    } else {
        processor.process_entry(&mut entry, args.force).await?
    };
    info!("Outcome: {}", serde_json::to_string(&outcome)?);

    let json = serde_json::to_string_pretty(&entry)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Entry written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn read_entry(path: &Path) -> Result<Entry, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Could not read entry file {}: {}", path.display(), e))?;
    let entry = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid entry JSON in {}: {}", path.display(), e))?;
    Ok(entry)
}

/// A standalone entry whose guid and feed are derived from the URL.
fn entry_for_url(url: &str) -> Entry {
    Entry::new(url, url).with_feed(Feed::new(0, url))
}

fn apply_selector(entry: &mut Entry, selector: &str) {
    let link = entry.link.clone();
    entry
        .feed
        .get_or_insert_with(|| Feed::new(0, link))
        .path_entries = Some(selector.to_string());
}
