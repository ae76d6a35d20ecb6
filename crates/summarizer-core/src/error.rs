//! Pipeline errors.

use thiserror::Error;

use summarizer_protocols::{FetchError, SummaryError};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Summarization failed: {0}")]
    Summary(#[from] SummaryError),

    #[error("Feed is null for entry {0}")]
    MissingFeed(String),
}
