use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::debug;
use warp_core::{Scope, WARPRC_FILE};
use warp_parser::ConfigParser;
use warp_resolver::{AliasResolver, LineErrorHandler};
use warp_tmux::SessionManager;

use crate::settings::Settings;

/// Pick the warprc to scan: explicit flag, then settings, then `$HOME/.warprc`.
pub fn warprc_path(flag: Option<PathBuf>, settings: &Settings, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag.or_else(|| settings.warprc.clone()) {
        return Ok(path);
    }
    match home {
        Some(home) => Ok(home.join(WARPRC_FILE)),
        None => bail!("value of environment variable HOME not set"),
    }
}

/// Resolve `name` in `warprc` and open its session.
pub fn start_session<P, H, M>(
    resolver: &AliasResolver<P, H>,
    manager: &M,
    warprc: &Path,
    name: &str,
    timeout: Option<Duration>,
) -> Result<()>
where
    P: ConfigParser + 'static,
    H: LineErrorHandler,
    M: SessionManager,
{
    let scope = match timeout {
        Some(timeout) => Scope::with_timeout(timeout),
        None => Scope::new(),
    };

    let path = resolver.resolve(&scope, warprc, name)?;
    debug!(alias = name, path = %path.display(), "warping");
    manager.ensure_session_and_attach(name, &path)
}

// ── Tests ──
