//! Content fetcher errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Tab creation, control channel I/O or HTTP failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unexpected or missing fields in a control-protocol response.
    #[error("Protocol format error: {0}")]
    ProtocolFormat(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl FetchError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }
}
