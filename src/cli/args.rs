//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--config <file>`: Use this config file instead of the default lookup
//!
//! # Input Words
//!
//! `tokens` and `parse` take the words to analyse after `--`, so option-like
//! words reach the command parser untouched:
//!
//! ```text
//! cmdtree parse --manifest commands.toml -- root1 --arg1 hi
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cmdtree - Inspect how words tokenize and bind against a command tree
#[derive(Parser, Debug)]
#[command(name = "cmdtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default lookup
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where the command tree comes from and how to print.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Command manifest (defaults to `manifest.path` from the config file)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Tree source plus the words to analyse.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Words to analyse, given after `--`
    #[arg(last = true, value_name = "WORDS")]
    pub words: Vec<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the token stream and lexer messages for some words
    #[command(after_help = "\
EXAMPLES:
    cmdtree tokens --manifest commands.toml -- root2 sub1 --arg1 x
    cmdtree tokens --manifest commands.toml --json -- '[debug]' root1")]
    Tokens {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse words and show the bound command, values and diagnostics
    #[command(after_help = "\
Exits with status 1 when no command resolved or any error was reported.

EXAMPLES:
    cmdtree parse --manifest commands.toml -- root1 --arg1 hi
    cmdtree parse --manifest commands.toml --json -- root3 -abc")]
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the command tree with registrations and options
    Tree {
        #[command(flatten)]
        tree: TreeArgs,
    },
}
