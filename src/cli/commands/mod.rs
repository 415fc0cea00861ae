//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the command tree from a manifest
//! 2. Runs the parser (or part of it)
//! 3. Formats and displays output
//!
//! Handlers return the process exit code.

mod parse;
mod tokens;
mod tree;

pub use parse::parse;
pub use tokens::tokens;
pub use tree::tree;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use super::args::Command;
use super::Context;
use crate::core::catalog::CommandCatalog;
use crate::core::manifest::Manifest;
use crate::parser::Parser;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::Tokens { input } => tokens::tokens(ctx, &input),
        Command::Parse { input } => parse::parse(ctx, &input),
        Command::Tree { tree } => tree::tree(ctx, &tree),
    }
}

/// The manifest to use: `--manifest`, else `manifest.path` from the config
/// file (relative to that file).
fn manifest_path(ctx: &Context, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let Some(path) = ctx.config.manifest_path() else {
        bail!("No manifest given. Pass --manifest or set manifest.path in the config file.");
    };
    let base = ctx.config.loaded_from().and_then(Path::parent);
    Ok(match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    })
}

/// Load the manifest into a catalog.
pub(crate) fn load_catalog(ctx: &Context, explicit: Option<&Path>) -> Result<CommandCatalog> {
    let path = manifest_path(ctx, explicit)?;
    output::debug(format!("loading manifest {}", path.display()), ctx.verbosity);

    let registrations = Manifest::load(&path)
        .and_then(Manifest::into_registrations)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    let catalog = CommandCatalog::with_registrations(ctx.config.parser(), registrations)
        .context("Invalid command tree")?;
    Ok(catalog)
}

/// Load the manifest and return a parser over it.
pub(crate) fn load_parser(ctx: &Context, explicit: Option<&Path>) -> Result<Parser> {
    let catalog = load_catalog(ctx, explicit)?;
    catalog.parser().context("Failed to create parser")
}
