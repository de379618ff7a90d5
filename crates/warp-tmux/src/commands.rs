// ── tmux Command Runner ──
//
// Thin wrappers around the tmux binary. Each call spawns one process.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};
use tracing::debug;

// ── Constants ──

const DEFAULT_BINARY: &str = "tmux";

/// Set by tmux in every pane it runs.
const TMUX_ENV: &str = "TMUX";

// ── Types ──

/// The tmux operations the session manager needs.
pub trait TmuxCommands {
    /// Whether this process runs inside a tmux client.
    fn in_session(&self) -> bool;

    fn has_session(&self, name: &str) -> bool;

    /// Create a detached session named `name` whose start directory is `path`.
    fn create_session(&self, name: &str, path: &Path) -> Result<()>;

    /// Attach to `name`, taking over this terminal until the client detaches.
    /// Only valid outside tmux.
    fn attach_session(&self, name: &str) -> Result<()>;

    /// Point the current client at `name`. Only valid inside tmux.
    fn switch_client(&self, name: &str) -> Result<()>;
}

/// Runs the real tmux binary.
#[derive(Debug, Clone)]
pub struct Tmux {
    binary: String,
}

// ── Helpers ──

impl Default for Tmux {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl Tmux {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, subcommand: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(subcommand).args(args);
        cmd
    }

    /// Run to completion, capturing output, and fail on a non-zero exit.
    fn run(&self, subcommand: &str, mut cmd: Command) -> Result<Output> {
        debug!(command = ?cmd, "running tmux");
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running {} {}", self.binary, subcommand))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} {} failed ({}): {}",
                self.binary,
                subcommand,
                output.status,
                stderr.trim()
            );
        }
        Ok(output)
    }
}

impl TmuxCommands for Tmux {
    fn in_session(&self) -> bool {
        std::env::var_os(TMUX_ENV).is_some()
    }

    fn has_session(&self, name: &str) -> bool {
        self.command("has-session", &["-t", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn create_session(&self, name: &str, path: &Path) -> Result<()> {
        // The start directory goes through as an OsStr so non-UTF-8 paths survive.
        let mut cmd = self.command("new-session", &["-d", "-s", name, "-c"]);
        cmd.arg(path);
        self.run("new-session", cmd)?;
        Ok(())
    }

    fn attach_session(&self, name: &str) -> Result<()> {
        debug!(binary = %self.binary, session = name, "attaching");
        let status = self
            .command("attach-session", &["-t", name])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("running {} attach-session", self.binary))?;

        if !status.success() {
            bail!("{} attach-session failed ({})", self.binary, status);
        }
        Ok(())
    }

    fn switch_client(&self, name: &str) -> Result<()> {
        self.run("switch-client", self.command("switch-client", &["-t", name]))?;
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binary() {
        assert_eq!(Tmux::default().binary, "tmux");
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let tmux = Tmux::new("/nonexistent/bin/tmux-for-tests");
        let err = tmux.create_session("s", Path::new("/tmp")).unwrap_err();
        assert!(err.to_string().contains("new-session"));
        assert!(!tmux.has_session("s"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_an_error() {
        // `false` ignores its arguments and exits 1.
        let tmux = Tmux::new("false");
        let err = tmux.switch_client("s").unwrap_err();
        assert!(err.to_string().contains("switch-client failed"));
    }
}
