//! Content fetcher protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Text and markup captured from one element of a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub text: String,
    pub html: String,
}

impl FetchResult {
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }
}

/// Renders a webpage and extracts the element matched by a CSS selector.
///
/// Implementations fall back to the document body when the selector matches
/// nothing, and absorb retryable failures internally.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_content(&self, url: &str, selector: &str) -> Result<FetchResult, FetchError>;
}
