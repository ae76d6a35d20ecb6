//! # Summarizer Protocols
//!
//! Core protocol definitions (traits) for the summarizer pipeline.
//! Contains only interfaces and value types - no I/O.
//!
//! ## Core Traits
//!
//! - [`ContentFetcher`] - Renders a webpage and extracts one element
//! - [`Summarizer`] - Turns article text into a summary and raw tags
//! - [`ProcessLock`] - Non-blocking cross-process mutual exclusion

pub mod entry;
pub mod error;
pub mod fetcher;
pub mod lock;
pub mod summarizer;

pub use entry::{attributes, AttributeValue, Entry, Feed};
pub use error::{FetchError, SummaryError};
pub use fetcher::{ContentFetcher, FetchResult};
pub use lock::ProcessLock;
pub use summarizer::{Summarizer, SummaryResult};
