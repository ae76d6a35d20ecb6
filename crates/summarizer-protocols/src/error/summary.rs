//! Summarizer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("No content provided to summarize")]
    EmptyContent,

    #[error("Failed to connect to model service: {0}")]
    Connection(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response envelope lacks the expected fields.
    #[error("Unexpected response format: {0}")]
    Format(String),

    /// The model output is not the requested JSON object.
    #[error("Invalid model output: {0}")]
    Content(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
