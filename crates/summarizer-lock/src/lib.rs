//! # Summarizer Lock
//!
//! Non-blocking, host-wide mutual exclusion for the enrichment pipeline.
//!
//! [`FileLock`] takes an advisory exclusive lock on a well-known file and
//! records who holds it. [`NullLock`] always succeeds and is meant for tests
//! and single-process setups.

mod file;
mod info;
mod null;

pub use file::{FileLock, LockStatus};
pub use info::LockInfo;
pub use null::NullLock;
