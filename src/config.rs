//! Configuration loading and management
//!
//! Handles parsing of `.taba.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data directory (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            board: BoardConfig::default(),
        }
    }
}

/// Board-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Name of the project synthesized when a task is created with no
    /// project present
    #[serde(default = "default_project_name")]
    pub default_project_name: String,

    /// Color of the synthesized default project
    #[serde(default = "default_project_color")]
    pub default_project_color: String,

    /// Color of the default project synthesized during rehydration of
    /// legacy state
    #[serde(default = "default_migration_color")]
    pub migration_project_color: String,
}

fn default_project_name() -> String {
    "General".to_string()
}

fn default_project_color() -> String {
    "#6366f1".to_string()
}

fn default_migration_color() -> String {
    "#FCD535".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_project_name: default_project_name(),
            default_project_color: default_project_color(),
            migration_project_color: default_migration_color(),
        }
    }
}

impl Config {
    /// Load configuration from a `.taba.toml` file
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &PathBuf) -> Self {
        let config_path = dir.join(".taba.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.board.validate()?;
        Ok(())
    }
}

impl BoardConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.default_project_name.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "board.default_project_name cannot be empty".to_string(),
            ));
        }
        validate_color(&self.default_project_color, "board.default_project_color")?;
        validate_color(
            &self.migration_project_color,
            "board.migration_project_color",
        )?;
        Ok(())
    }
}

/// Validate a `#rgb` / `#rrggbb` hex color, naming `field` in the error.
pub fn validate_color(value: &str, field: &str) -> crate::error::Result<()> {
    let hex = value.strip_prefix('#').ok_or_else(|| {
        crate::error::Error::InvalidConfig(format!(
            "{field}: expected a hex color like #6366f1, got '{value}'"
        ))
    })?;
    if !(hex.len() == 3 || hex.len() == 6) || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(crate::error::Error::InvalidConfig(format!(
            "{field}: expected a hex color like #6366f1, got '{value}'"
        )));
    }
    Ok(())
}
