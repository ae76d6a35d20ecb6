//! Summarizer protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SummaryError;

/// Model output. `tags` are trimmed but not normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize article text. Empty input fails without any network call.
    async fn generate_summary(&self, content: &str) -> Result<SummaryResult, SummaryError>;
}
