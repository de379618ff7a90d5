pub mod error;
pub mod scope;
pub mod types;

pub use error::{ParseError, ResolutionError};
pub use scope::{DropGuard, Scope};
pub use types::{ConfigRecord, ParseOutcome};

// ── Format Constants ──

/// Separator between the alias name and its path on a warprc line.
pub const SEPARATOR: char = ':';

/// Leading marker in a path value that stands for the home directory.
pub const HOME_MARKER: char = '~';

/// Environment variable holding the home directory.
pub const HOME_ENV: &str = "HOME";

/// File name of the alias config inside the home directory.
pub const WARPRC_FILE: &str = ".warprc";
