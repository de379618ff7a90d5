mod settings;
mod start;

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use warp_parser::{HomeDir, WarpRcParser};
use warp_resolver::AliasResolver;
use warp_tmux::{Tmux, TmuxManager};

use crate::settings::Settings;

// ── CLI Definition ──

#[derive(Parser)]
#[command(name = "twd", about = "Warp to a tmux session by alias", version)]
struct Cli {
    /// Alias file to read instead of ~/.warprc
    #[arg(long, env = "TWD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new session and warp to it
    #[command(visible_alias = "s")]
    Start {
        /// Alias of the session, as listed in the warprc
        name: String,
    },
}

// ── Main ──

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Start { name } => {
            if name.is_empty() {
                bail!("name argument cannot be empty");
            }

            let settings = match Settings::default_path() {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            let warprc = start::warprc_path(cli.config, &settings, HomeDir::default().lookup())?;

            let resolver = AliasResolver::new(WarpRcParser::new());
            let manager = TmuxManager::new(Tmux::new(settings.tmux.clone()));
            start::start_session(&resolver, &manager, &warprc, &name, settings.timeout())
        }
    }
}

/// Log to stderr; tmux owns stdout once a session is attached.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── Tests ──
