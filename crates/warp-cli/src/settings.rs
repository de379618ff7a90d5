// ── Settings ──
//
// Optional YAML file at <config_dir>/tmux-warp/config.yaml:
//
//   warprc: /path/to/aliases   # default: $HOME/.warprc
//   tmux: /usr/local/bin/tmux  # default: tmux
//   timeout_ms: 2000           # default: no deadline

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

// ── Constants ──

const APP_DIR: &str = "tmux-warp";
const SETTINGS_FILE: &str = "config.yaml";

// ── Types ──

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub warprc: Option<PathBuf>,
    #[serde(default = "default_tmux")]
    pub tmux: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

// ── Helpers ──

fn default_tmux() -> String {
    "tmux".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            warprc: None,
            tmux: default_tmux(),
            timeout_ms: None,
        }
    }
}

// ── Public API ──

impl Settings {
    /// Location of the settings file for this user, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing, empty, or only comments.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings: {}", path.display()))?;

        let is_blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if is_blank {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing settings: {}", path.display()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

// ── Tests ──
