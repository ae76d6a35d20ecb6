use std::sync::atomic::{AtomicBool, Ordering};

use summarizer_protocols::ProcessLock;

/// A lock that is always available.
#[derive(Debug, Default)]
pub struct NullLock {
    held: AtomicBool,
}

impl NullLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessLock for NullLock {
    fn acquire(&self, _identifier: &str) -> bool {
        self.held.store(true, Ordering::SeqCst);
        true
    }

    fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}
