//! # Summarizer Core
//!
//! The enrichment pipeline for a single entry: lock, idempotency checks,
//! fetch, summarize, tag merge and the processed marker.

mod error;
mod outcome;
mod processor;
pub mod tags;

pub use error::ProcessError;
pub use outcome::Outcome;
pub use processor::EntryProcessor;
