//! core::registration
//!
//! Command registrations: a path, its options, aliases and a target.
//!
//! # Validation
//!
//! [`RegistrationBuilder::build`] fails fast on registrations the parser
//! could never serve correctly (no path, no target, clashing option names
//! or positions). Once built, a registration is immutable.
//!
//! # Targets
//!
//! The parser never interprets a [`Target`]. It is carried through to the
//! [`ParseResult`] for the execution layer:
//! - [`Target::Named`] - symbolic handler id resolved by the host
//! - [`Target::Function`] - a shared closure invoked with the parse result
//!
//! # Example
//!
//! ```
//! use cmdtree::core::option::CommandOption;
//! use cmdtree::core::registration::{CommandRegistration, Target};
//!
//! let registration = CommandRegistration::builder()
//!     .command("root2 sub1")
//!     .description("second level")
//!     .option(CommandOption::builder().long("arg1").short('a'))
//!     .alias("r2 s1")
//!     .target(Target::named("root2-sub1"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registration.path().segments(), ["root2", "sub1"]);
//! assert_eq!(registration.aliases().len(), 1);
//! assert!(registration.find_short('a').is_some());
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::option::{CommandOption, OptionBuilder, OptionError};
use super::types::{CommandPath, TypeError};
use crate::parser::ParseResult;

/// Errors from registration construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("registration has no command path")]
    EmptyPath,

    #[error(transparent)]
    InvalidPath(#[from] TypeError),

    #[error("command '{path}' has no target")]
    MissingTarget { path: String },

    #[error("command '{path}': invalid option: {source}")]
    InvalidOption { path: String, source: OptionError },

    #[error("command '{path}': option name '{name}' declared by more than one option")]
    DuplicateOptionName { path: String, name: String },

    #[error("command '{path}': position {position} declared by more than one option")]
    DuplicatePosition { path: String, position: usize },

    #[error("command '{path}': invalid alias: {source}")]
    InvalidAlias { path: String, source: TypeError },
}

type HandlerFn = dyn Fn(&ParseResult) -> Result<(), String> + Send + Sync;

/// A shared command handler.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ParseResult) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, result: &ParseResult) -> Result<(), String> {
        (self.0)(result)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler(..)")
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What a registration dispatches to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Named(String),
    Function(Handler),
}

impl Target {
    pub fn named(id: impl Into<String>) -> Self {
        Target::Named(id.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&ParseResult) -> Result<(), String> + Send + Sync + 'static,
    {
        Target::Function(Handler::new(f))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Named(id) => write!(f, "{id}"),
            Target::Function(_) => write!(f, "<function>"),
        }
    }
}

/// An alternative path for a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAlias {
    pub path: CommandPath,
    pub group: Option<String>,
}

/// A registered command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRegistration {
    #[serde(serialize_with = "serialize_path")]
    path: CommandPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip)]
    group: Option<String>,
    #[serde(skip)]
    hidden: bool,
    #[serde(skip)]
    options: Vec<CommandOption>,
    #[serde(skip)]
    aliases: Vec<CommandAlias>,
    #[serde(skip)]
    target: Target,
}

fn serialize_path<S: Serializer>(path: &CommandPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

impl CommandRegistration {
    /// Start building a registration.
    pub fn builder() -> RegistrationBuilder {
        RegistrationBuilder::default()
    }

    pub fn path(&self) -> &CommandPath {
        &self.path
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn aliases(&self) -> &[CommandAlias] {
        &self.aliases
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Find an option by long name (without `--`).
    pub fn find_long(&self, name: &str, case_sensitive: bool) -> Option<&CommandOption> {
        self.options
            .iter()
            .find(|o| o.matches_long(name, case_sensitive))
    }

    /// Find an option by short name.
    pub fn find_short(&self, c: char) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.matches_short(c))
    }

    /// Options with a position, lowest rank first.
    pub fn positional_options(&self) -> Vec<&CommandOption> {
        let mut positional: Vec<_> = self
            .options
            .iter()
            .filter(|o| o.position().is_some())
            .collect();
        positional.sort_by_key(|o| o.position());
        positional
    }
}

/// Builder for [`CommandRegistration`].
#[derive(Debug, Default)]
pub struct RegistrationBuilder {
    words: Vec<String>,
    description: Option<String>,
    group: Option<String>,
    hidden: bool,
    options: Vec<OptionBuilder>,
    aliases: Vec<(String, Option<String>)>,
    target: Option<Target>,
}

impl RegistrationBuilder {
    /// Set the command path from space-separated words, e.g. `"root2 sub1"`.
    pub fn command(mut self, words: impl AsRef<str>) -> Self {
        self.words = words
            .as_ref()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        self
    }

    /// Set the command path from separate words.
    pub fn commands<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words = words
            .into_iter()
            .flat_map(|w| {
                w.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Declare an option.
    pub fn option(mut self, option: OptionBuilder) -> Self {
        self.options.push(option);
        self
    }

    /// Add an alias path.
    pub fn alias(mut self, path: impl AsRef<str>) -> Self {
        self.aliases.push((path.as_ref().to_string(), None));
        self
    }

    /// Add an alias path shown under `group`.
    pub fn alias_in_group(mut self, path: impl AsRef<str>, group: impl Into<String>) -> Self {
        self.aliases
            .push((path.as_ref().to_string(), Some(group.into())));
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Validate and build the registration.
    ///
    /// # Errors
    ///
    /// See [`RegistrationError`] for the rules enforced.
    pub fn build(self) -> Result<CommandRegistration, RegistrationError> {
        if self.words.is_empty() {
            return Err(RegistrationError::EmptyPath);
        }
        let path = CommandPath::new(&self.words)?;
        let path_str = path.to_string();

        let target = self.target.ok_or_else(|| RegistrationError::MissingTarget {
            path: path_str.clone(),
        })?;

        let options = self
            .options
            .into_iter()
            .map(OptionBuilder::build)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| RegistrationError::InvalidOption {
                path: path_str.clone(),
                source,
            })?;
        check_option_clashes(&path_str, &options)?;

        let aliases = self
            .aliases
            .into_iter()
            .map(|(alias, group)| {
                CommandPath::parse(&alias)
                    .map(|path| CommandAlias { path, group })
                    .map_err(|source| RegistrationError::InvalidAlias {
                        path: path_str.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CommandRegistration {
            path,
            description: self.description,
            group: self.group,
            hidden: self.hidden,
            options,
            aliases,
            target,
        })
    }
}

fn check_option_clashes(path: &str, options: &[CommandOption]) -> Result<(), RegistrationError> {
    let mut names = BTreeSet::new();
    let mut positions = BTreeSet::new();

    for option in options {
        for name in option.spellings() {
            if !names.insert(name.clone()) {
                return Err(RegistrationError::DuplicateOptionName {
                    path: path.to_string(),
                    name,
                });
            }
        }
        if let Some(position) = option.position() {
            if !positions.insert(position) {
                return Err(RegistrationError::DuplicatePosition {
                    path: path.to_string(),
                    position,
                });
            }
        }
    }
    Ok(())
}
