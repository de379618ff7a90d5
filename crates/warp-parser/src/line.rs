use std::path::{Path, PathBuf};

use warp_core::{ConfigRecord, ParseError, ParseOutcome, HOME_ENV, HOME_MARKER, SEPARATOR};

// ── Types ──

/// Where the home directory comes from when a path starts with `~`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeDir {
    /// Read the named environment variable at the moment it's needed.
    Env(String),
    /// A fixed value; `None` behaves like an unset variable.
    Fixed(Option<PathBuf>),
}

impl Default for HomeDir {
    fn default() -> Self {
        HomeDir::Env(HOME_ENV.to_string())
    }
}

impl HomeDir {
    pub fn fixed(home: impl Into<PathBuf>) -> Self {
        HomeDir::Fixed(Some(home.into()))
    }

    /// Current home directory, or `None` when unset or empty. The value is
    /// taken as raw OS bytes, so a non-UTF-8 home still expands.
    pub fn lookup(&self) -> Option<PathBuf> {
        let value = match self {
            HomeDir::Env(var) => std::env::var_os(var).map(PathBuf::from),
            HomeDir::Fixed(value) => value.clone(),
        };
        value.filter(|v| !v.as_os_str().is_empty())
    }
}

// ── Public API ──

/// Parse one warprc line. `line_no` is 1-based and only used in errors.
///
/// A valid line has exactly one separator. Blank lines are invalid too.
pub fn parse_line(line: &str, line_no: usize, home: &HomeDir) -> ParseOutcome {
    let mut parts = line.split(SEPARATOR);
    let (name, path) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(path), None) => (name, path),
        _ => return Err(ParseError::InvalidLineFormat { line: line_no }),
    };

    match path.strip_prefix(HOME_MARKER) {
        Some(rest) => {
            let home_dir = home
                .lookup()
                .ok_or(ParseError::HomeDirectoryUnresolved { line: line_no })?;
            Ok(ConfigRecord::new(name, expand_home(&home_dir, rest)))
        }
        None => Ok(ConfigRecord::new(name, path)),
    }
}

// ── Helpers ──

/// Join the home directory with whatever followed the `~`.
fn expand_home(home: &Path, rest: &str) -> PathBuf {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return home.to_path_buf();
    }
    home.join(rest)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn home(value: &str) -> HomeDir {
        HomeDir::fixed(value)
    }

    #[test]
    fn test_plain_line() {
        let record = parse_line("a:/x", 1, &HomeDir::Fixed(None)).unwrap();
        assert_eq!(record, ConfigRecord::new("a", "/x"));
    }

    #[test]
    fn test_home_alias_expansion() {
        let record = parse_line("p:~/proj", 1, &home("/home/u")).unwrap();
        assert_eq!(record, ConfigRecord::new("p", "/home/u/proj"));
    }

    #[test]
    fn test_home_alias_keeps_remainder() {
        let h = home("/home/u");
        assert_eq!(
            parse_line("d:~/code/deep/dir", 1, &h).unwrap().path(),
            Path::new("/home/u/code/deep/dir")
        );
        assert_eq!(parse_line("h:~", 1, &h).unwrap().path(), Path::new("/home/u"));
        assert_eq!(
            parse_line("n:~notes", 1, &h).unwrap().path(),
            Path::new("/home/u/notes")
        );
        assert_eq!(
            parse_line("t:~/proj", 1, &home("/home/u/")).unwrap().path(),
            Path::new("/home/u/proj")
        );
    }

    #[test]
    fn test_missing_separator_is_invalid() {
        let err = parse_line("no-separator-here", 4, &HomeDir::Fixed(None)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLineFormat { line: 4 }));
    }

    #[test]
    fn test_extra_separator_is_invalid() {
        let err = parse_line("bad:line:extra", 1, &HomeDir::Fixed(None)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLineFormat { line: 1 }));
    }

    // Blank lines are reported, not skipped.
    #[test]
    fn test_blank_line_is_invalid() {
        let err = parse_line("", 2, &HomeDir::Fixed(None)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLineFormat { line: 2 }));
    }

    #[test]
    fn test_unset_home_only_matters_for_tilde_paths() {
        let unset = HomeDir::Fixed(None);
        let err = parse_line("p:~/proj", 3, &unset).unwrap_err();
        assert!(matches!(err, ParseError::HomeDirectoryUnresolved { line: 3 }));

        assert!(parse_line("p:/abs/proj", 3, &unset).is_ok());
    }

    #[test]
    fn test_empty_home_counts_as_unset() {
        let err = parse_line("p:~/proj", 1, &home("")).unwrap_err();
        assert!(matches!(err, ParseError::HomeDirectoryUnresolved { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_expands() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = PathBuf::from(OsString::from_vec(b"/home/\xffu".to_vec()));
        let record = parse_line("p:~/proj", 1, &HomeDir::Fixed(Some(raw.clone()))).unwrap();
        assert_eq!(record.path(), raw.join("proj").as_path());
    }

    #[test]
    fn test_env_home_read_only_when_needed() {
        let missing = HomeDir::Env("TWD_TEST_HOME_THAT_IS_NEVER_SET".to_string());
        assert!(parse_line("p:/abs", 1, &missing).is_ok());
        assert!(matches!(
            parse_line("p:~/rel", 1, &missing),
            Err(ParseError::HomeDirectoryUnresolved { .. })
        ));
    }
}
