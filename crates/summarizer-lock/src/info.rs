//! Lock holder diagnostics.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who holds the lock, written into the lock file by the holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    pub pid: u32,
    /// Acquisition time, seconds since the Unix epoch.
    pub timestamp: i64,
    pub identifier: String,
    pub hostname: String,
}

impl LockInfo {
    /// Describe the current process.
    pub fn current(identifier: &str) -> Self {
        Self {
            pid: std::process::id(),
            timestamp: Utc::now().timestamp(),
            identifier: identifier.to_string(),
            hostname: hostname(),
        }
    }

    /// Seconds since the lock was taken. Never negative.
    pub fn age_secs(&self) -> i64 {
        (Utc::now().timestamp() - self.timestamp).max(0)
    }

    /// Whether the recorded holder may still be running. A holder on another
    /// host cannot be checked and is assumed alive.
    pub fn holder_alive(&self) -> bool {
        self.hostname != hostname() || is_process_running(self.pid)
    }
}

impl fmt::Display for LockInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID: {}, Age: {} seconds, Identifier: {}, Host: {}",
            self.pid,
            self.age_secs(),
            self.identifier,
            self.hostname
        )
    }
}

#[cfg(unix)]
fn hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(unix))]
fn hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    // Signal 0 checks existence only
    match kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_process_running(_pid: u32) -> bool {
    true
}
