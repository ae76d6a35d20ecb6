//! # Summarizer Fetcher: Chrome
//!
//! Captures rendered page content from a remote Chrome instance.
//!
//! Each attempt opens a fresh tab through the DevTools HTTP API, drives it
//! over the tab's WebSocket control channel, and closes it again whatever
//! the outcome.
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! chrome --headless --remote-debugging-port=9222
//! ```

mod client;
mod error;
mod fetcher;
mod protocol;
mod script;
mod session;

#[cfg(test)]
mod test_support;

pub use client::{DevToolsClient, TabTarget};
pub use error::CdpError;
pub use fetcher::ChromeFetcher;
pub use protocol::*;
pub use session::TabSession;
