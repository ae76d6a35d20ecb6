//! Process lock protocol.

/// Non-blocking mutual exclusion shared by every process on a host.
///
/// `acquire` never waits: under contention it returns `false`, which callers
/// treat as a normal skip rather than an error.
pub trait ProcessLock: Send + Sync {
    /// Try to take the lock. Re-acquiring a lock this instance already holds
    /// returns `true` without side effects.
    fn acquire(&self, identifier: &str) -> bool;

    /// Release the lock. A no-op when not held.
    fn release(&self);

    /// Whether this instance currently holds the lock.
    fn is_held(&self) -> bool;
}
