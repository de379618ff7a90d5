// ── Error Types ──

use std::path::PathBuf;
use thiserror::Error;

/// Why a line of the warprc file produced no record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid line format at line {line}: expected <name>:<path>")]
    InvalidLineFormat { line: usize },

    #[error("cannot expand ~ at line {line}: value of environment variable HOME not set")]
    HomeDirectoryUnresolved { line: usize },

    #[error("error while reading {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan was cancelled before the file was fully parsed")]
    Cancelled,
}

impl ParseError {
    /// Terminal errors end the stream; nothing follows them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ParseError::SourceUnavailable { .. } | ParseError::Cancelled
        )
    }
}

/// Why an alias lookup failed as a whole.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("alias '{alias}' not found in {}", .config_path.display())]
    AliasNotFound { alias: String, config_path: PathBuf },

    #[error("cannot resolve alias '{alias}': failed to read {}: {source}", .config_path.display())]
    SourceUnavailable {
        alias: String,
        config_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deadline expired before alias '{alias}' was found in {}", .config_path.display())]
    DeadlineExceeded { alias: String, config_path: PathBuf },

    #[error("cannot start the warprc parser thread: {source}")]
    ParserUnavailable {
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ResolutionError>;

// ── Tests ──
