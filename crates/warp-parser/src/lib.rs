// ── Streaming warprc Parser ──
//
// A producer parses a warprc file line by line and hands each outcome to a
// single consumer over a rendezvous channel. Per-line problems are reported
// in-band and scanning continues; an unreadable source or a cancelled scope
// ends the stream with one final error.

pub mod channel;
pub mod line;
pub mod warprc;

use std::path::Path;

use warp_core::Scope;

pub use channel::{outcome_channel, OutcomeSink, OutcomeStream};
pub use line::{parse_line, HomeDir};
pub use warprc::WarpRcParser;

/// Something that can stream the records of an alias config file.
pub trait ConfigParser: Send + Sync {
    /// Parse the file at `path`, sending exactly one outcome per line into
    /// `sink` in file order. The stream closes when `sink` is dropped.
    fn parse(&self, path: &Path, scope: &Scope, sink: OutcomeSink);
}
