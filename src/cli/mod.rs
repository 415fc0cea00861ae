//! cli
//!
//! Command-line interface layer for the `cmdtree` developer binary.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging and load configuration
//! - Delegate to command handlers
//!
//! The binary only inspects how words tokenize and bind. It never executes
//! a command's target.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};
use env_logger::Env;
use log::LevelFilter;

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Shared state for command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    pub verbosity: Verbosity,
    pub config: Config,
}

/// Run the CLI application and return the process exit code.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let loaded = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }
    if let Some(path) = loaded.config.loaded_from() {
        output::debug(format!("config loaded from {}", path.display()), verbosity);
    }

    let ctx = Context {
        verbosity,
        config: loaded.config,
    };
    commands::dispatch(cli.command, &ctx)
}

/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    // A logger may already be installed when run from tests
    let _ = builder.format_timestamp(None).try_init();
}
