//! Entry processor.
//!
//! Runs one entry through the enrichment state machine. The process lock is
//! taken before any state is inspected and released on every exit path.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, info_span, Instrument};

use summarizer_config::{Config, FeedsConfig, ProcessorConfig};
use summarizer_protocols::{
    attributes, ContentFetcher, Entry, ProcessLock, Summarizer, SummaryResult,
};

use crate::error::ProcessError;
use crate::outcome::Outcome;
use crate::tags::{merge_tags, normalize_tags};

/// Releases the lock when dropped, so early returns and errors cannot leak it.
struct LockGuard<'a> {
    lock: &'a dyn ProcessLock,
}

impl<'a> LockGuard<'a> {
    fn acquire(lock: &'a dyn ProcessLock, identifier: &str) -> Option<Self> {
        lock.acquire(identifier).then_some(Self { lock })
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Enriches entries with a model-generated summary and tags.
pub struct EntryProcessor {
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: Arc<dyn Summarizer>,
    lock: Arc<dyn ProcessLock>,
    config: ProcessorConfig,
    feeds: FeedsConfig,
}

impl EntryProcessor {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn ContentFetcher>,
        summarizer: Arc<dyn Summarizer>,
        lock: Arc<dyn ProcessLock>,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            lock,
            config: config.processor.clone(),
            feeds: config.feeds.clone(),
        }
    }

    /// Entry point for newly ingested entries. Only entries whose feed is in
    /// the allowlist are processed.
    pub async fn admit(&self, entry: &mut Entry) -> Result<Outcome, ProcessError> {
        let selected = entry
            .feed
            .as_ref()
            .is_some_and(|feed| self.feeds.is_selected(feed.id));

        if !selected {
            debug!(guid = %entry.guid, "Feed not selected, skipping entry");
            return Ok(Outcome::NotSelected);
        }

        self.process_entry(entry, false).await
    }

    /// Run the state machine over one entry.
    ///
    /// `force` re-enriches entries that carry the processed marker or were
    /// re-delivered. Errors from fetching or summarizing leave the entry
    /// unmarked and are returned after logging.
    pub async fn process_entry(
        &self,
        entry: &mut Entry,
        force: bool,
    ) -> Result<Outcome, ProcessError> {
        let span = info_span!(
            "entry",
            guid = %entry.guid,
            start_timestamp = Utc::now().timestamp()
        );
        self.run(entry, force).instrument(span).await
    }

    async fn run(&self, entry: &mut Entry, force: bool) -> Result<Outcome, ProcessError> {
        let Some(_guard) = LockGuard::acquire(self.lock.as_ref(), &entry.guid) else {
            info!("Could not acquire lock, skipping entry");
            return Ok(Outcome::LockedOut);
        };

        debug!(tags = ?entry.tags, force, "Processing entry");

        if !force && entry.has_attribute(attributes::PROCESSED) {
            let saved = entry.attribute_array(attributes::TAGS);
            let restored = merge_tags(&mut entry.tags, &saved);
            debug!(restored = ?restored, "Entry already processed");
            return Ok(Outcome::AlreadyProcessed { restored });
        }

        if !force && entry.is_updated {
            debug!("Entry is an update of a stored entry, skipping");
            return Ok(Outcome::Updated);
        }

        if entry.link.trim().is_empty() {
            info!("No URL found, skipping");
            return Ok(Outcome::NoUrl);
        }

        match self.enrich(entry).await {
            Ok(outcome) => {
                info!(tags = ?entry.tags, "Finished processing entry");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, url = %entry.link, "Failed to process entry");
                Err(e)
            }
        }
    }

    async fn enrich(&self, entry: &mut Entry) -> Result<Outcome, ProcessError> {
        let feed = entry
            .feed
            .as_ref()
            .ok_or_else(|| ProcessError::MissingFeed(entry.guid.clone()))?;
        let selector = feed
            .selector()
            .unwrap_or(&self.config.default_selector)
            .to_string();

        info!(url = %entry.link, selector = %selector, "Fetching content");
        let fetched = self.fetcher.fetch_content(&entry.link, &selector).await?;
        entry.set_attribute(attributes::HTML, fetched.html);

        let outcome = if fetched.text.trim().is_empty() {
            info!("No content fetched from URL");
            Outcome::Empty
        } else {
            debug!(chars = fetched.text.chars().count(), "Content fetched");
            let result = self.summarizer.generate_summary(&fetched.text).await?;

            if self.config.debug_attributes {
                entry.set_attribute(attributes::DEBUG, debug_record(&fetched.text, &result));
            }

            if result.summary.is_empty() && result.tags.is_empty() {
                info!("Empty response from model");
                Outcome::Empty
            } else {
                Self::merge(entry, result)
            }
        };

        if outcome == Outcome::Empty {
            Self::clear_results(entry);
        }
        entry.set_attribute(attributes::PROCESSED, true);
        debug!("Marked entry as processed");
        Ok(outcome)
    }

    /// Drop results of an earlier run so a forced empty run leaves none behind.
    fn clear_results(entry: &mut Entry) {
        entry.remove_attribute(attributes::SUMMARY);
        entry.set_attribute(attributes::TAGS, Vec::<String>::new());
    }

    fn merge(entry: &mut Entry, result: SummaryResult) -> Outcome {
        if result.summary.is_empty() {
            entry.remove_attribute(attributes::SUMMARY);
        } else {
            entry.set_attribute(attributes::SUMMARY, result.summary.clone());
        }

        let tags = normalize_tags(&result.tags);
        let added = merge_tags(&mut entry.tags, &tags);
        debug!(tags = ?tags, added = ?added, "Merged tags");
        entry.set_attribute(attributes::TAGS, tags.clone());

        Outcome::Enriched {
            summary: result.summary,
            tags,
        }
    }
}

fn debug_record(content: &str, result: &SummaryResult) -> String {
    serde_json::json!({
        "content": content,
        "ollamaResponse": result,
    })
    .to_string()
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
