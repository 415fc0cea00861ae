//! core::types
//!
//! Strong types for command and option identity.
//!
//! # Types
//!
//! - [`CommandPath`] - Validated, non-empty sequence of command words
//! - [`LongName`] - Validated long option name (spelled `--name`)
//! - [`ShortName`] - Validated single-letter option name (spelled `-n`)
//!
//! # Validation
//!
//! These types enforce validity at construction time. A registration that
//! could never be matched by the lexer (a command word starting with `-`,
//! a numeric short option) cannot be represented.
//!
//! # Examples
//!
//! ```
//! use cmdtree::core::types::{CommandPath, LongName, ShortName};
//!
//! // Words may be given separately or space-separated
//! let path = CommandPath::new(["root2 sub1", "sub2"]).unwrap();
//! assert_eq!(path.segments(), ["root2", "sub1", "sub2"]);
//! assert_eq!(path.to_string(), "root2 sub1 sub2");
//!
//! // Invalid constructions fail at creation time
//! assert!(CommandPath::parse("   ").is_err());
//! assert!(LongName::new("--arg").is_err());
//! assert!(ShortName::new('1').is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid command path: {0}")]
    InvalidCommandPath(String),

    #[error("invalid long option name: {0}")]
    InvalidLongName(String),

    #[error("invalid short option name: {0}")]
    InvalidShortName(String),
}

/// A validated command path.
///
/// Paths are ordered command words, e.g. `["root2", "sub1"]`. Rules:
/// - At least one word
/// - A word cannot start with `-` (it would lex as an option)
/// - A word cannot start with `[` (it would lex as a directive)
/// - A word cannot contain ASCII control characters
///
/// Input words are split on whitespace, so `"root2 sub1"` and
/// `["root2", "sub1"]` describe the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Create a path from one or more (possibly space-separated) words.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommandPath` if no words remain after
    /// splitting or if any word is not a valid command word.
    pub fn new<I, S>(words: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = words
            .into_iter()
            .flat_map(|w| {
                w.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        if segments.is_empty() {
            return Err(TypeError::InvalidCommandPath(
                "command path cannot be empty".into(),
            ));
        }
        for segment in &segments {
            Self::validate_segment(segment)?;
        }
        Ok(Self(segments))
    }

    /// Parse a space-separated path such as `"root2 sub1"`.
    pub fn parse(path: &str) -> Result<Self, TypeError> {
        Self::new([path])
    }

    fn validate_segment(segment: &str) -> Result<(), TypeError> {
        if segment.starts_with('-') {
            return Err(TypeError::InvalidCommandPath(format!(
                "command word '{segment}' cannot start with '-'"
            )));
        }
        if segment.starts_with('[') {
            return Err(TypeError::InvalidCommandPath(format!(
                "command word '{segment}' cannot start with '['"
            )));
        }
        if segment.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidCommandPath(
                "command word cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// The individual words of this path.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of words in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare two paths, folding case when `case_sensitive` is false.
    pub fn matches(&self, other: &CommandPath, case_sensitive: bool) -> bool {
        if case_sensitive {
            return self == other;
        }
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

impl TryFrom<String> for CommandPath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CommandPath> for String {
    fn from(path: CommandPath) -> Self {
        path.0.join(" ")
    }
}

impl std::fmt::Display for CommandPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// A validated long option name, stored without its leading `--`.
///
/// Long names cannot be empty, start with `-`, or contain whitespace,
/// `=` or control characters.
///
/// # Example
///
/// ```
/// use cmdtree::core::types::LongName;
///
/// let name = LongName::new("dry-run").unwrap();
/// assert_eq!(name.as_str(), "dry-run");
/// assert_eq!(name.flag(), "--dry-run");
///
/// assert!(LongName::new("").is_err());
/// assert!(LongName::new("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongName(String);

impl LongName {
    /// Create a new validated long name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLongName` if the name cannot be lexed as
    /// a `--name` option.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();

        if name.is_empty() {
            return Err(TypeError::InvalidLongName(
                "long name cannot be empty".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidLongName(format!(
                "long name '{name}' must be given without leading dashes"
            )));
        }
        if name.contains('=') {
            return Err(TypeError::InvalidLongName(format!(
                "long name '{name}' cannot contain '='"
            )));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidLongName(format!(
                "long name '{name}' cannot contain whitespace or control characters"
            )));
        }

        Ok(Self(name))
    }

    /// Get the name as a string slice (without dashes).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name as typed on a command line, e.g. `--arg1`.
    pub fn flag(&self) -> String {
        format!("--{}", self.0)
    }
}

impl TryFrom<String> for LongName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LongName> for String {
    fn from(name: LongName) -> Self {
        name.0
    }
}

impl AsRef<str> for LongName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LongName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated short option name.
///
/// Short names must be alphabetic: the lexer treats `-1` or `-a1` as
/// arguments, so a numeric short option could never be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct ShortName(char);

impl ShortName {
    /// Create a new validated short name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidShortName` if `name` is not alphabetic.
    pub fn new(name: char) -> Result<Self, TypeError> {
        if !name.is_alphabetic() {
            return Err(TypeError::InvalidShortName(format!(
                "short name '{name}' must be a letter"
            )));
        }
        Ok(Self(name))
    }

    /// The underlying character.
    pub fn as_char(&self) -> char {
        self.0
    }

    /// The name as typed on a command line, e.g. `-a`.
    pub fn flag(&self) -> String {
        format!("-{}", self.0)
    }
}

impl TryFrom<char> for ShortName {
    type Error = TypeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl From<ShortName> for char {
    fn from(name: ShortName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ShortName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
