// SPDX-License-Identifier: MPL-2.0
//! Content-change notifications for the open page file.
//!
//! The watcher is polled from a periodic app subscription and compares the
//! file's modification time and length with the last observation. Polling
//! keeps it independent of any platform notification API.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

impl Fingerprint {
    /// Observes `path`; `None` when the file cannot be inspected.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        Some(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Watcher {
    path: PathBuf,
    last: Option<Fingerprint>,
}

impl Watcher {
    /// Starts watching `path` from its current state.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let last = Fingerprint::of(&path);
        Self { path, last }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the fingerprint and reports whether it changed.
    ///
    /// A file that disappears is a change; so is one that reappears.
    pub fn poll(&mut self) -> bool {
        let current = Fingerprint::of(&self.path);
        if current == self.last {
            return false;
        }
        tracing::debug!(path = %self.path.display(), "page file changed");
        self.last = current;
        true
    }
}
