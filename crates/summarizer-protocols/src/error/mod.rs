//! Error types for the summarizer protocol layer.

mod fetch;
mod summary;

pub use fetch::*;
pub use summary::*;
