//! UI preferences, persisted in their own namespace.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::Storage;

/// Color scheme preference for the board UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sidebar_open: default_sidebar_open(),
        }
    }
}

fn default_sidebar_open() -> bool {
    true
}

/// Preference state backed by the `prefs` storage namespace.
#[derive(Debug)]
pub struct PrefsStore {
    storage: Storage,
    prefs: Preferences,
}

impl PrefsStore {
    pub fn load(storage: Storage) -> Self {
        let prefs = storage
            .read_json_opt(&storage.prefs_file())
            .unwrap_or_default();
        Self { storage, prefs }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.prefs.theme = theme;
        self.persist()
    }

    pub fn toggle_sidebar(&mut self) -> Result<bool> {
        self.prefs.sidebar_open = !self.prefs.sidebar_open;
        self.persist()?;
        Ok(self.prefs.sidebar_open)
    }

    fn persist(&self) -> Result<()> {
        self.storage
            .write_json(&self.storage.prefs_file(), &self.prefs)
    }
}
