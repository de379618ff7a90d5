use std::path::{Path, PathBuf};

use crate::error::ParseError;

// ── Types ──

/// One successfully parsed `name:path` line of a warprc file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    name: String,
    path: PathBuf,
}

/// The result produced for a single line: a record or the reason there isn't one.
pub type ParseOutcome = std::result::Result<ConfigRecord, ParseError>;

// ── Helpers ──

impl ConfigRecord {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path as written, or with `~` already expanded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl std::fmt::Display for ConfigRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, crate::SEPARATOR, self.path.display())
    }
}

// ── Tests ──
