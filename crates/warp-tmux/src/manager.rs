use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::commands::TmuxCommands;

/// Opens a named session rooted at a directory and hands the terminal to it.
pub trait SessionManager {
    /// Create the session if it doesn't exist yet, then attach or switch to it.
    fn ensure_session_and_attach(&self, name: &str, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct TmuxManager<C> {
    commands: C,
}

impl<C: TmuxCommands> TmuxManager<C> {
    pub fn new(commands: C) -> Self {
        Self { commands }
    }
}

impl<C: TmuxCommands> SessionManager for TmuxManager<C> {
    fn ensure_session_and_attach(&self, name: &str, path: &Path) -> Result<()> {
        if self.commands.has_session(name) {
            debug!(session = name, "session already exists");
        } else {
            info!(session = name, path = %path.display(), "creating session");
            self.commands.create_session(name, path)?;
        }

        if self.commands.in_session() {
            self.commands.switch_client(name)
        } else {
            self.commands.attach_session(name)
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const SESSION_NAME: &str = "test";

    fn session_path() -> &'static Path {
        Path::new("/path/to/test")
    }

    /// Records every call; `attach`/`switch` fail when used from the wrong side.
    struct FakeCommands {
        inside_tmux: bool,
        existing: bool,
        calls: RefCell<Vec<String>>,
        created_in: RefCell<Option<PathBuf>>,
    }

    impl FakeCommands {
        fn new(inside_tmux: bool, existing: bool) -> Self {
            Self {
                inside_tmux,
                existing,
                calls: RefCell::new(Vec::new()),
                created_in: RefCell::new(None),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl TmuxCommands for FakeCommands {
        fn in_session(&self) -> bool {
            self.inside_tmux
        }

        fn has_session(&self, _name: &str) -> bool {
            self.existing
        }

        fn create_session(&self, name: &str, path: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("create {name} {}", path.display()));
            *self.created_in.borrow_mut() = Some(path.to_path_buf());
            Ok(())
        }

        fn attach_session(&self, name: &str) -> Result<()> {
            if self.inside_tmux {
                bail!("attach session should not be called");
            }
            self.calls.borrow_mut().push(format!("attach {name}"));
            Ok(())
        }

        fn switch_client(&self, name: &str) -> Result<()> {
            if !self.inside_tmux {
                bail!("switch client should not be called");
            }
            self.calls.borrow_mut().push(format!("switch {name}"));
            Ok(())
        }
    }

    #[test]
    fn test_inside_tmux_session_switches() {
        let manager = TmuxManager::new(FakeCommands::new(true, false));
        manager
            .ensure_session_and_attach(SESSION_NAME, session_path())
            .unwrap();
        assert_eq!(
            manager.commands.calls(),
            vec!["create test /path/to/test", "switch test"]
        );
    }

    #[test]
    fn test_outside_tmux_session_attaches() {
        let manager = TmuxManager::new(FakeCommands::new(false, false));
        manager
            .ensure_session_and_attach(SESSION_NAME, session_path())
            .unwrap();
        assert_eq!(
            manager.commands.calls(),
            vec!["create test /path/to/test", "attach test"]
        );
    }

    #[test]
    fn test_existing_session_is_not_recreated() {
        let manager = TmuxManager::new(FakeCommands::new(false, true));
        manager
            .ensure_session_and_attach(SESSION_NAME, session_path())
            .unwrap();
        assert_eq!(manager.commands.calls(), vec!["attach test"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_reaches_create_unchanged() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = PathBuf::from(OsString::from_vec(b"/srv/\xffproj".to_vec()));
        let manager = TmuxManager::new(FakeCommands::new(false, false));
        manager.ensure_session_and_attach(SESSION_NAME, &raw).unwrap();
        assert_eq!(manager.commands.created_in.borrow().as_deref(), Some(raw.as_path()));
    }

    #[test]
    fn test_create_failure_stops_before_attach() {
        struct BrokenCreate;

        impl TmuxCommands for BrokenCreate {
            fn in_session(&self) -> bool {
                false
            }
            fn has_session(&self, _name: &str) -> bool {
                false
            }
            fn create_session(&self, _name: &str, _path: &Path) -> Result<()> {
                bail!("no server running");
            }
            fn attach_session(&self, _name: &str) -> Result<()> {
                panic!("attach must not run after a failed create");
            }
            fn switch_client(&self, _name: &str) -> Result<()> {
                panic!("switch must not run after a failed create");
            }
        }

        let err = TmuxManager::new(BrokenCreate)
            .ensure_session_and_attach(SESSION_NAME, session_path())
            .unwrap_err();
        assert!(err.to_string().contains("no server running"));
    }
}
