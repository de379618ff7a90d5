pub mod commands;
pub mod manager;

pub use commands::{Tmux, TmuxCommands};
pub use manager::{SessionManager, TmuxManager};
