//! Shared wiring for CLI commands: config, storage, and store handles.

use std::path::PathBuf;

use crate::board::BoardStore;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventDestination;
use crate::output::OutputOptions;
use crate::prefs::PrefsStore;
use crate::session::SessionStore;
use crate::storage::Storage;

/// Global flags shared by every subcommand.
pub struct ContextOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
    pub events: Option<String>,
}

/// Resolved context a command runs against.
///
/// Data directory precedence: `--data-dir` flag (or `TABA_DATA_DIR`),
/// then `data_dir` from `.taba.toml` in the current directory, then the
/// platform data dir.
pub struct CliContext {
    pub config: Config,
    pub storage: Storage,
    pub output: OutputOptions,
    events: Option<String>,
}

impl CliContext {
    pub fn open(options: ContextOptions) -> Result<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config = Config::load_from_dir(&cwd);

        let storage = match options.data_dir.or_else(|| config.data_dir.clone()) {
            Some(dir) => Storage::new(dir),
            None => Storage::platform_default()?,
        };

        // `--events -` claims stdout for JSONL, so the JSON envelope moves
        // aside rather than interleave.
        let events_to_stdout = options
            .events
            .as_deref()
            .map(|value| value.trim() == "-")
            .unwrap_or(false);
        let output = OutputOptions {
            json: options.json && !events_to_stdout,
            quiet: options.quiet,
        };

        Ok(Self {
            config,
            storage,
            output,
            events: options.events,
        })
    }

    /// Open the board store, attaching an event sink when `--events` is set.
    pub fn board(&self) -> Result<BoardStore> {
        let mut store = BoardStore::load(self.storage.clone(), self.config.board.clone())?;
        if let Some(destination) = EventDestination::parse(self.events.as_deref()) {
            store.add_observer(Box::new(destination.open()?));
        }
        Ok(store)
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::load(self.storage.clone())
    }

    pub fn prefs(&self) -> PrefsStore {
        PrefsStore::load(self.storage.clone())
    }
}
