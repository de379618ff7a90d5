pub mod handler;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error};
use warp_core::error::Result;
use warp_core::{ParseError, ResolutionError, Scope};
use warp_parser::{outcome_channel, ConfigParser, OutcomeStream};

pub use handler::{DiscardLineErrors, LineErrorHandler, LineErrorTally};

// ── Types ──

/// Looks up a single alias by driving a `ConfigParser` and stopping at the
/// first matching record.
#[derive(Debug)]
pub struct AliasResolver<P, H = DiscardLineErrors> {
    parser: Arc<P>,
    handler: H,
}

// ── Public API ──

impl<P> AliasResolver<P>
where
    P: ConfigParser + 'static,
{
    pub fn new(parser: P) -> Self {
        Self::with_handler(parser, DiscardLineErrors)
    }
}

impl<P, H> AliasResolver<P, H>
where
    P: ConfigParser + 'static,
    H: LineErrorHandler,
{
    pub fn with_handler(parser: P, handler: H) -> Self {
        Self {
            parser: Arc::new(parser),
            handler,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Resolve `wanted` to the path of its first record in `config_path`.
    ///
    /// The parser runs on its own thread under a child of `scope`. Whatever
    /// the result, the child is cancelled by the time this returns. A match
    /// returns without waiting for the parser thread, which may still be
    /// blocked in a read; it sees the cancellation at its next line and exits.
    pub fn resolve(&self, scope: &Scope, config_path: &Path, wanted: &str) -> Result<PathBuf> {
        let child = scope.child();
        let cancel_on_return = child.drop_guard();
        let (sink, stream) = outcome_channel();

        let producer = {
            let parser = Arc::clone(&self.parser);
            let path = config_path.to_path_buf();
            let child = child.clone();
            thread::Builder::new()
                .name("warprc-parser".to_string())
                .spawn(move || parser.parse(&path, &child, sink))
                .map_err(|source| ResolutionError::ParserUnavailable { source })?
        };

        // The stream is dropped inside `consume`, which unblocks a producer
        // still waiting to hand over its next outcome.
        let result = self.consume(stream, scope, config_path, wanted);

        drop(cancel_on_return);
        // Without a match the stream has ended, so the producer is already
        // on its way out.
        if result.is_err() && producer.join().is_err() {
            error!(path = %config_path.display(), "warprc parser thread panicked");
        }

        result
    }
}

// ── Helpers ──

impl<P, H> AliasResolver<P, H>
where
    H: LineErrorHandler,
{
    fn consume(
        &self,
        stream: OutcomeStream,
        scope: &Scope,
        config_path: &Path,
        wanted: &str,
    ) -> Result<PathBuf> {
        let mut cancelled = false;
        for outcome in stream {
            match outcome {
                Ok(record) if record.name() == wanted => {
                    debug!(alias = wanted, path = %record.path().display(), "alias resolved");
                    return Ok(record.into_path());
                }
                Ok(_) => {}
                Err(ParseError::SourceUnavailable { source, .. }) => {
                    return Err(ResolutionError::SourceUnavailable {
                        alias: wanted.to_string(),
                        config_path: config_path.to_path_buf(),
                        source,
                    });
                }
                Err(err) => {
                    cancelled |= matches!(err, ParseError::Cancelled);
                    self.handler.on_line_error(&err);
                }
            }
        }

        if cancelled && scope.deadline_expired() {
            debug!(alias = wanted, "deadline expired during scan");
            return Err(ResolutionError::DeadlineExceeded {
                alias: wanted.to_string(),
                config_path: config_path.to_path_buf(),
            });
        }
        Err(not_found(wanted, config_path))
    }
}

fn not_found(alias: &str, config_path: &Path) -> ResolutionError {
    ResolutionError::AliasNotFound {
        alias: alias.to_string(),
        config_path: PathBuf::from(config_path),
    }
}

// ── Tests ──
