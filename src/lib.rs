//! taba: a Kanban task board for the terminal.
//!
//! The core of the crate is [`board::BoardStore`], an in-memory state
//! store for projects, tasks and the activity log, persisted as JSON
//! snapshots under a per-user data directory. Everything else layers on
//! top of it:
//!
//! - [`view`] derives filtered/sorted board columns without touching
//!   the stored task order.
//! - [`drag`] is the drag-and-drop gesture state machine; moves commit
//!   eagerly on hover, so a drop or cancel never rolls anything back.
//! - [`events`] publishes board mutations as JSONL for scripting.
//! - [`session`] and [`prefs`] are small satellite stores with their
//!   own storage namespaces (mock auth, UI preferences).
//! - [`cli`] and [`ui`] are the two frontends: a scriptable command
//!   surface with a JSON output mode, and an interactive ratatui board.
//!
//! Persistence goes through [`storage::Storage`], which pairs every
//! snapshot write with a lock file and an atomic rename ([`lock`]).

pub mod activity;
pub mod board;
pub mod cli;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod lock;
pub mod output;
pub mod prefs;
pub mod project;
pub mod session;
pub mod storage;
pub mod task;
pub mod ui;
pub mod view;

pub use error::{Error, Result};
