// ── Line Error Handling ──
//
// Non-terminal outcomes (bad lines, unexpandable `~`, cancellation) never
// fail a lookup. What happens to them is decided here, apart from the parser.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;
use warp_core::ParseError;

/// Receives every non-terminal error seen while resolving an alias.
pub trait LineErrorHandler: Send + Sync {
    fn on_line_error(&self, error: &ParseError);
}

/// Logs and drops line errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLineErrors;

impl LineErrorHandler for DiscardLineErrors {
    fn on_line_error(&self, error: &ParseError) {
        debug!(%error, "skipping warprc line");
    }
}

/// Counts line errors by kind.
#[derive(Debug, Default)]
pub struct LineErrorTally {
    invalid_format: AtomicUsize,
    home_unresolved: AtomicUsize,
    cancelled: AtomicUsize,
}

impl LineErrorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalid_format(&self) -> usize {
        self.invalid_format.load(Ordering::Relaxed)
    }

    pub fn home_unresolved(&self) -> usize {
        self.home_unresolved.load(Ordering::Relaxed)
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Lines that produced no record.
    pub fn skipped_lines(&self) -> usize {
        self.invalid_format() + self.home_unresolved()
    }
}

impl LineErrorHandler for LineErrorTally {
    fn on_line_error(&self, error: &ParseError) {
        let counter = match error {
            ParseError::InvalidLineFormat { .. } => &self.invalid_format,
            ParseError::HomeDirectoryUnresolved { .. } => &self.home_unresolved,
            ParseError::Cancelled => &self.cancelled,
            // Terminal; the resolver never forwards it.
            ParseError::SourceUnavailable { .. } => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl<H: LineErrorHandler + ?Sized> LineErrorHandler for &H {
    fn on_line_error(&self, error: &ParseError) {
        (**self).on_line_error(error);
    }
}

// ── Tests ──
