//! core::manifest
//!
//! Declarative command manifests in TOML.
//!
//! # Format
//!
//! ```toml
//! [[command]]
//! path = "root2 sub1"
//! description = "Second level command"
//! aliases = ["r2 s1"]
//! handler = "root2-sub1"        # defaults to the path joined by '-'
//!
//! [[command.option]]
//! long = "arg1"                 # or a list
//! short = ["a"]
//! type = "int"                  # string|bool|int|float|choice|list<...>
//! required = true
//! default = 1
//! arity = "exactly-one"         # or { min = 1, max = 3 }
//! position = 0
//! ```
//!
//! Entries are converted through the registration builders, so every
//! registration rule applies to manifest commands as well.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::option::{Arity, CommandOption, OptionBuilder, OptionType};
use super::registration::{CommandRegistration, RegistrationError, Target};

/// Errors from manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("command '{command}': option '{option}' has unknown type '{name}'")]
    InvalidType {
        command: String,
        option: String,
        name: String,
    },

    #[error("command '{command}': option '{option}' has unknown arity '{name}'")]
    InvalidArity {
        command: String,
        option: String,
        name: String,
    },

    #[error("command '{command}': {source}")]
    Registration {
        command: String,
        source: RegistrationError,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// A scalar default, written as TOML string, number or boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum DefaultValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::String(s) => write!(f, "{s}"),
            DefaultValue::Int(i) => write!(f, "{i}"),
            DefaultValue::Float(x) => write!(f, "{x}"),
            DefaultValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ArityEntry {
    Named(String),
    Range { min: usize, max: usize },
}

/// `[[command.option]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    long: Option<OneOrMany<String>>,
    short: Option<OneOrMany<char>>,
    #[serde(rename = "type")]
    option_type: Option<String>,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    required: bool,
    default: Option<DefaultValue>,
    arity: Option<ArityEntry>,
    position: Option<usize>,
    description: Option<String>,
    label: Option<String>,
}

/// `[[command]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEntry {
    path: OneOrMany<String>,
    description: Option<String>,
    group: Option<String>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    aliases: Vec<String>,
    handler: Option<String>,
    #[serde(default, rename = "option")]
    options: Vec<OptionEntry>,
}

impl CommandEntry {
    fn words(&self) -> Vec<String> {
        self.path
            .clone()
            .into_vec()
            .iter()
            .flat_map(|w| w.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }
}

/// A parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "command")]
    commands: Vec<CommandEntry>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Manifest, ManifestError> {
        Self::parse(Path::new("<inline>"), contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Manifest, ManifestError> {
        toml::from_str(contents).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Number of `[[command]]` entries.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Build registrations for every entry, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first entry that fails to convert, naming its path.
    pub fn into_registrations(self) -> Result<Vec<CommandRegistration>, ManifestError> {
        self.commands.into_iter().map(build_command).collect()
    }
}

fn build_command(entry: CommandEntry) -> Result<CommandRegistration, ManifestError> {
    let words = entry.words();
    let command = words.join(" ");
    let handler = entry.handler.clone().unwrap_or_else(|| words.join("-"));

    let mut builder = CommandRegistration::builder()
        .commands(&words)
        .hidden(entry.hidden)
        .target(Target::Named(handler));
    if let Some(description) = entry.description {
        builder = builder.description(description);
    }
    if let Some(group) = entry.group {
        builder = builder.group(group);
    }
    for alias in &entry.aliases {
        builder = builder.alias(alias);
    }
    for option in entry.options {
        builder = builder.option(build_option(&command, option)?);
    }

    builder
        .build()
        .map_err(|source| ManifestError::Registration { command, source })
}

fn build_option(command: &str, entry: OptionEntry) -> Result<OptionBuilder, ManifestError> {
    let longs = entry.long.map(OneOrMany::into_vec).unwrap_or_default();
    let shorts = entry.short.map(OneOrMany::into_vec).unwrap_or_default();
    // Names are not validated yet; only used in error messages
    let option_label = longs
        .first()
        .cloned()
        .or_else(|| shorts.first().map(char::to_string))
        .unwrap_or_else(|| "<unnamed>".to_string());

    let mut builder = CommandOption::builder().set_required(entry.required);
    for long in longs {
        builder = builder.long(long);
    }
    for short in shorts {
        builder = builder.short(short);
    }

    if let Some(name) = &entry.option_type {
        let option_type = OptionType::from_name(name, &entry.choices).ok_or_else(|| {
            ManifestError::InvalidType {
                command: command.to_string(),
                option: option_label.clone(),
                name: name.clone(),
            }
        })?;
        builder = builder.option_type(option_type);
    }

    match entry.arity {
        Some(ArityEntry::Named(name)) => {
            let arity = Arity::from_name(&name).ok_or_else(|| ManifestError::InvalidArity {
                command: command.to_string(),
                option: option_label.clone(),
                name,
            })?;
            builder = builder.arity(arity);
        }
        Some(ArityEntry::Range { min, max }) => {
            builder = builder.arity(Arity::Range { min, max });
        }
        None => {}
    }

    if let Some(default) = entry.default {
        builder = builder.default_value(default.to_string());
    }
    if let Some(position) = entry.position {
        builder = builder.position(position);
    }
    if let Some(description) = entry.description {
        builder = builder.description(description);
    }
    if let Some(label) = entry.label {
        builder = builder.label(label);
    }
    Ok(builder)
}
