//! File-backed process lock.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use summarizer_protocols::ProcessLock;

use crate::info::LockInfo;

/// State of a lock file as seen from outside the holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    /// No lock file, or an empty record left by a clean release.
    Free,
    /// A record left behind by a holder that is no longer running.
    Stale(Option<LockInfo>),
    /// The recorded holder is running, or runs on another host.
    Held(Option<LockInfo>),
}

/// Advisory exclusive lock on a file, shared by every process on the host.
///
/// The OS drops the lock when the holding process dies, so a crashed run
/// never blocks later ones. The file persists between holders: it is emptied
/// on release and rewritten by the next holder.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl FileLock {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the holder diagnostics recorded in the lock file.
    pub fn read_info(&self) -> Option<LockInfo> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Inspect the lock from the holder record alone. No OS lock is taken,
    /// so a concurrent `acquire` is never disturbed.
    pub fn status(&self) -> io::Result<LockStatus> {
        if self.handle.lock().is_some() {
            return Ok(LockStatus::Held(self.read_info()));
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LockStatus::Free),
            Err(e) => return Err(e),
        };
        if content.trim().is_empty() {
            return Ok(LockStatus::Free);
        }

        Ok(match serde_json::from_str::<LockInfo>(&content) {
            Ok(info) if info.holder_alive() => LockStatus::Held(Some(info)),
            Ok(info) => LockStatus::Stale(Some(info)),
            Err(_) => LockStatus::Stale(None),
        })
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
    }

    fn write_info(mut file: &File, info: &LockInfo) -> io::Result<()> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        serde_json::to_writer(file, info)?;
        file.flush()?;
        file.sync_all()
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == fs2::lock_contended_error().kind()
}

impl ProcessLock for FileLock {
    fn acquire(&self, identifier: &str) -> bool {
        let mut handle = self.handle.lock();
        if handle.is_some() {
            debug!("Lock already held by this instance: {}", self.path.display());
            return true;
        }

        let file = match self.open() {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to open lock file {}: {}", self.path.display(), e);
                return false;
            }
        };

        if let Err(e) = file.try_lock_exclusive() {
            if is_contended(&e) {
                match self.read_info() {
                    Some(holder) => info!("Lock is held by another process ({})", holder),
                    None => info!("Lock is held by another process: {}", self.path.display()),
                }
            } else {
                error!("Failed to lock {}: {}", self.path.display(), e);
            }
            return false;
        }

        let info = LockInfo::current(identifier);
        if let Err(e) = Self::write_info(&file, &info) {
            warn!("Failed to record lock holder in {}: {}", self.path.display(), e);
        }

        debug!("Lock acquired for {}: {}", identifier, self.path.display());
        *handle = Some(file);
        true
    }

    fn release(&self) {
        let Some(file) = self.handle.lock().take() else {
            return;
        };

        // The file stays in place: unlinking it would let a new opener lock a
        // fresh inode while another process still locks the old one.
        if let Err(e) = file.set_len(0) {
            warn!("Failed to clear lock file {}: {}", self.path.display(), e);
        }
        if let Err(e) = FileExt::unlock(&file) {
            warn!("Failed to unlock {}: {}", self.path.display(), e);
        }

        debug!("Lock released: {}", self.path.display());
    }

    fn is_held(&self) -> bool {
        self.handle.lock().is_some()
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
