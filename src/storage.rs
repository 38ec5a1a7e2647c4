//! Storage layer for taba
//!
//! All state lives as JSON snapshots in a single data directory, one file
//! per namespace:
//!
//! ```text
//! <data_dir>/
//!   board.json       # projects, tasks, current project pointer
//!   activity.json    # activity log entries
//!   session.json     # signed-in user, if any
//!   prefs.json       # UI preferences
//! ```
//!
//! Every write is atomic (temp + rename) and guarded by a `<file>.lock`
//! sibling so a CLI invocation cannot corrupt state under a running TUI.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

/// Snapshot file names, one per namespace.
pub const BOARD_FILE: &str = "board.json";
pub const ACTIVITY_FILE: &str = "activity.json";
pub const SESSION_FILE: &str = "session.json";
pub const PREFS_FILE: &str = "prefs.json";

/// Qualified application identifiers for the platform data directory.
const APP_QUALIFIER: &str = "";
const APP_ORGANIZATION: &str = "";
const APP_NAME: &str = "taba";

/// Storage manager for taba state
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at an explicit directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Create a storage manager at the platform data directory
    /// (e.g. `~/.local/share/taba` on Linux).
    pub fn platform_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or(Error::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    /// Path to the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the board snapshot
    pub fn board_file(&self) -> PathBuf {
        self.data_dir.join(BOARD_FILE)
    }

    /// Path to the activity log snapshot
    pub fn activity_file(&self) -> PathBuf {
        self.data_dir.join(ACTIVITY_FILE)
    }

    /// Path to the session snapshot
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// Path to the UI preferences snapshot
    pub fn prefs_file(&self) -> PathBuf {
        self.data_dir.join(PREFS_FILE)
    }

    /// Ensure the data directory exists
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Write JSON data atomically while holding the file's lock.
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let lock_path = lock_path_for(path);
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;
        lock::write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a snapshot file while holding its lock.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let lock_path = lock_path_for(path);
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;
        let content = std::fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Read a snapshot, treating a missing or unreadable file as absent.
    ///
    /// Corrupt snapshots are indistinguishable from missing ones to the
    /// caller: both start the namespace fresh rather than failing startup.
    pub fn read_json_opt<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }
        match self.read_json(path) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable snapshot");
                None
            }
        }
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.lock", path.display()))
}
