//! ui::output
//!
//! Terminal output for the `cmdtree` binary.
//!
//! Results go to stdout and are silenced by `--quiet`. Diagnostics about
//! the binary itself (warnings, errors, debug notes) go to stderr. `--json`
//! output is printed by the handlers directly and never passes through
//! here.

use std::fmt::Display;

/// How much the binary prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    Normal,
    /// Normal output plus `[debug]` notes
    Debug,
}

impl Verbosity {
    /// `--quiet` takes precedence over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn is_quiet(self) -> bool {
        self == Verbosity::Quiet
    }
}

/// Print a result to stdout.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{message}");
    }
}

/// Print a `[debug]` note to stderr.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {message}");
    }
}

/// Print an error to stderr, even in quiet mode.
pub fn error(message: impl Display) {
    eprintln!("error: {message}");
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        eprintln!("warning: {message}");
    }
}

/// One line per item, each starting with `prefix`.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    let lines: Vec<String> = items.iter().map(|item| format!("{prefix}{item}")).collect();
    lines.join("\n")
}

/// A `title:` line followed by `lines` indented one level, or nothing
/// when `lines` is empty.
pub fn section(title: &str, lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(format!("{title}:\n{}", format_list(lines, &indent(1))))
}

/// Two spaces per tree level.
pub fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
