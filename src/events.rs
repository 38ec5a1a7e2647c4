//! Domain events for external integrations.
//!
//! Every board mutation publishes one [`BoardEvent`] to registered
//! observers. The built-in activity log is not an observer: it is written
//! synchronously inside the store so callers can read it immediately after
//! a mutation. Observers are for everything else (event files, UI refresh
//! hooks).

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

pub const EVENT_SCHEMA_VERSION: &str = "taba.event.v1";

/// High-level event kinds emitted by the board store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardEventKind {
    ProjectCreated,
    ProjectEdited,
    ProjectDeleted,
    ProjectSelected,
    TaskCreated,
    TaskEdited,
    TaskMoved,
    TaskDeleted,
    BoardReset,
}

/// A structured event with optional payload.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEvent {
    pub schema_version: &'static str,
    pub event: BoardEventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl BoardEvent {
    pub fn new(event: BoardEventKind) -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            event,
            timestamp: Utc::now(),
            data: None,
        }
    }

    /// Attach a serializable payload to the event.
    pub fn with_data<T: Serialize>(mut self, data: T) -> Result<Self> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }
}

/// Subscriber notified after each board mutation.
///
/// Observers run after the state change and the activity log write; a
/// failing observer must not roll the mutation back, so `notify` is
/// infallible and implementations swallow their own errors.
pub trait BoardObserver: Send {
    fn notify(&mut self, event: &BoardEvent);
}

#[derive(Debug, Clone)]
pub enum EventDestination {
    Stdout,
    File(PathBuf),
}

impl EventDestination {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed == "-" {
                return Some(EventDestination::Stdout);
            }
            Some(EventDestination::File(PathBuf::from(trimmed)))
        })
    }

    pub fn open(&self) -> Result<EventSink> {
        match self {
            EventDestination::Stdout => Ok(EventSink::stdout()),
            EventDestination::File(path) => EventSink::file(path),
        }
    }
}

/// Event sink that writes JSONL output to a destination.
pub struct EventSink {
    writer: Box<dyn Write + Send>,
}

impl EventSink {
    /// Emit events to stdout.
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
        }
    }

    /// Emit events to a file, creating it if necessary.
    pub fn file(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            writer: Box::new(file),
        })
    }

    /// Write a single event as JSONL.
    pub fn emit(&mut self, event: &BoardEvent) -> Result<()> {
        let serialized = serde_json::to_vec(event)?;
        self.writer.write_all(&serialized)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush().map_err(Error::Io)?;
        Ok(())
    }
}

impl BoardObserver for EventSink {
    fn notify(&mut self, event: &BoardEvent) {
        if let Err(err) = self.emit(event) {
            tracing::warn!(%err, "failed to emit board event");
        }
    }
}
