//! Lock subcommand handlers.

use summarizer_config::Config;
use summarizer_lock::{FileLock, LockStatus};

use crate::cli::LockAction;

/// Handle lock subcommands.
pub(crate) fn handle_lock_command(
    action: LockAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LockAction::Status => {
            let lock = FileLock::new(&config.lock.path);
            println!("{}", describe(lock.path().display(), &lock.status()?));
            Ok(())
        }
    }
}

fn describe(path: impl std::fmt::Display, status: &LockStatus) -> String {
    match status {
        LockStatus::Free => format!("{}: free", path),
        LockStatus::Stale(Some(info)) => format!("{}: free (stale file, last holder {})", path, info),
        LockStatus::Stale(None) => format!("{}: free (stale file)", path),
        LockStatus::Held(Some(info)) => format!("{}: held ({})", path, info),
        LockStatus::Held(None) => format!("{}: held (holder unknown)", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_lock::LockInfo;

    #[test]
    fn test_describe_free() {
        assert_eq!(describe("/tmp/x.lock", &LockStatus::Free), "/tmp/x.lock: free");
    }

    #[test]
    fn test_describe_held_with_info() {
        let info = LockInfo::current("entry-42");
        let text = describe("/tmp/x.lock", &LockStatus::Held(Some(info)));
        assert!(text.starts_with("/tmp/x.lock: held (PID: "));
        assert!(text.contains("Identifier: entry-42"));
    }

    #[test]
    fn test_describe_stale() {
        assert!(describe("/tmp/x.lock", &LockStatus::Stale(None)).contains("stale"));
    }
}
