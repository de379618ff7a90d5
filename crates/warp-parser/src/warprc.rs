// ── warprc File Producer ──

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};
use warp_core::{ParseError, Scope};

use crate::channel::OutcomeSink;
use crate::line::{parse_line, HomeDir};
use crate::ConfigParser;

/// Parses `name:path` files from disk.
#[derive(Debug, Clone, Default)]
pub struct WarpRcParser {
    home: HomeDir,
}

impl WarpRcParser {
    /// A parser that expands `~` from `$HOME`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(home: HomeDir) -> Self {
        Self { home }
    }
}

impl ConfigParser for WarpRcParser {
    fn parse(&self, path: &Path, scope: &Scope, sink: OutcomeSink) {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                debug!(path = %path.display(), error = %source, "cannot open warprc");
                sink.send(Err(ParseError::SourceUnavailable {
                    path: path.to_path_buf(),
                    source,
                }));
                return;
            }
        };

        debug!(path = %path.display(), "scanning warprc");

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    debug!(line = line_no + 1, error = %source, "read failed mid-file");
                    sink.send(Err(ParseError::SourceUnavailable {
                        path: path.to_path_buf(),
                        source,
                    }));
                    return;
                }
            }
            line_no += 1;

            if scope.is_cancelled() {
                debug!(line = line_no, "scan cancelled");
                sink.send(Err(ParseError::Cancelled));
                return;
            }

            let outcome = match std::str::from_utf8(strip_line_ending(&buf)) {
                Ok(line) => parse_line(line, line_no, &self.home),
                Err(_) => {
                    debug!(line = line_no, "line is not valid UTF-8");
                    Err(ParseError::InvalidLineFormat { line: line_no })
                }
            };

            trace!(line = line_no, ok = outcome.is_ok(), "parsed line");

            if !sink.send(outcome) {
                debug!(line = line_no, "consumer went away, stopping scan");
                return;
            }
        }

        debug!(path = %path.display(), "finished warprc");
    }
}

// ── Helpers ──

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// ── Tests ──
