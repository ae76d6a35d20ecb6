//! CDP error types.

use thiserror::Error;

use summarizer_protocols::FetchError;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to the tab's control channel.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not reachable or not running with remote debugging.
    #[error("Could not create new tab in Chrome at {0}")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error object in a command response.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The evaluated script threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CdpError::Timeout(e.to_string())
        } else {
            CdpError::Http(e.to_string())
        }
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for FetchError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Timeout(_) => FetchError::Timeout(e.to_string()),
            CdpError::Protocol { .. }
            | CdpError::Serialization(_)
            | CdpError::JavaScript(_)
            | CdpError::InvalidResponse(_) => FetchError::ProtocolFormat(e.to_string()),
            CdpError::ConnectionFailed(_)
            | CdpError::ChromeNotAvailable(_)
            | CdpError::WebSocket(_)
            | CdpError::Http(_)
            | CdpError::NavigationFailed(_)
            | CdpError::SessionClosed => FetchError::Transport(e.to_string()),
        }
    }
}
