// SPDX-License-Identifier: MPL-2.0
//! Application state persisted across sessions in `state.cbor`.
//!
//! This is the reader's key-value store: the chosen theme and the last
//! directory browsed in the open dialog. User-editable preferences live in
//! `settings.toml` instead.
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with explicit directory
//! 2. `--data-dir` CLI flag or `POST_LENS_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.cbor";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Reading theme chosen with the header toggle.
    #[serde(default)]
    pub theme: ThemeMode,

    /// Initial directory for the open-page dialog.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads state from the default location.
    ///
    /// Returns default state plus a warning key when the file exists but
    /// cannot be read.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "state file corrupted");
                    (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "state file unreadable");
                (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                )
            }
        }
    }

    /// Saves state to the default location, returning a warning key on failure.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-write-error".to_string());
            }
        }

        let written = fs::File::create(&path)
            .map_err(|err| err.to_string())
            .and_then(|file| {
                ciborium::into_writer(self, BufWriter::new(file)).map_err(|err| err.to_string())
            });

        match written {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to write state file");
                Some("notification-state-write-error".to_string())
            }
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Remembers the directory containing `file_path` for the next dialog.
    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }
}
