//! Editor configuration: load, save, and sanitize.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "caret.json";

/// Environment variable that overrides the configuration path.
pub const CONFIG_PATH_ENV: &str = "CARET_CONFIG";

const MAX_PAGE_LINES: usize = 1000;

/// A keymap override: bind `chord` (e.g. `"ctrl+backspace"`) to a named command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub chord: String,
    pub command: String,
}

impl BindingEntry {
    pub fn new(chord: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            chord: chord.into(),
            command: command.into(),
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Lines moved by PageUp/PageDown.
    pub page_lines: usize,
    /// Text inserted by the Tab key.
    pub tab_text: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Keymap overrides, applied over the default bindings in order.
    pub bindings: Vec<BindingEntry>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            page_lines: 30,
            tab_text: "    ".to_string(),
            log_filter: "warn".to_string(),
            bindings: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `CARET_CONFIG` environment variable
    /// 2. `<user config dir>/caret/caret.json`
    /// 3. `caret.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        dirs::config_dir()
            .map(|d| d.join("caret").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {}: {e:#}", path.display());
                }
            }
            // Return defaults on error (don't overwrite a broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Loads and sanitizes config from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: EditorConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.sanitize();
        Ok(config)
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.page_lines = self.page_lines.clamp(1, MAX_PAGE_LINES);

        if self.tab_text.is_empty() || self.tab_text.contains(['\n', '\r']) {
            tracing::warn!("Ignoring invalid tab_text {:?}", self.tab_text);
            self.tab_text = Self::default().tab_text;
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
        self.bindings
            .retain(|b| !b.chord.trim().is_empty() && !b.command.trim().is_empty());
    }
}
