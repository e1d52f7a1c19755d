// config.rs — Stash configuration.
//
// StashConfig determines where Stash keeps its state: the goals snapshot
// and the event log live in one data directory, alongside an optional
// stash.toml with display overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a Stash instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashConfig {
    /// Directory holding the snapshot, the event log, and stash.toml.
    pub data_dir: PathBuf,

    /// Display options, overridable via stash.toml.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl StashConfig {
    /// Create a config rooted at the given data directory, applying
    /// stash.toml display overrides when the file is present.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let display = ConfigFile::load_or_default(&data_dir.join("stash.toml")).display;
        Self { data_dir, display }
    }

    /// The platform default data directory (e.g., `~/.local/share/stash`).
    /// Falls back to `.stash` in the current directory when the platform
    /// reports no data dir.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("stash"))
            .unwrap_or_else(|| PathBuf::from(".stash"))
    }

    /// Path of the goals snapshot document.
    pub fn goals_file(&self) -> PathBuf {
        self.data_dir.join("goals.json")
    }

    /// Path of the JSONL event log.
    pub fn events_log(&self) -> PathBuf {
        self.data_dir.join("events.jsonl")
    }
}

/// Display options from stash.toml's `[display]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol prefixed to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Width of the progress bar in glyphs.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            bar_width: default_bar_width(),
        }
    }
}

// Serde default functions
fn default_currency() -> String {
    "$".to_string()
}

fn default_bar_width() -> usize {
    10
}

/// Top-level contents of stash.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    display: DisplayConfig,
}

impl ConfigFile {
    /// Load from stash.toml.
    fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load config, returning defaults if the file doesn't exist.
    fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
