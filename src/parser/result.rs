//! parser::result
//!
//! The value returned by [`Parser::parse`](super::Parser::parse).
//!
//! A [`ParseResult`] always exists, whatever the input. Callers check
//! [`ParseResult::is_resolved`] and [`ParseResult::has_errors`] before
//! executing anything.

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::convert::OptionValue;
use super::message::MessageResult;
use crate::core::option::CommandOption;
use crate::core::registration::CommandRegistration;

/// How an option got its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Given by name (`--arg1 x`, `-a x`).
    Named,
    /// Taken from un-nested words by positional rank.
    Positional,
    /// The declared default value.
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueSource::Named => "named",
            ValueSource::Positional => "positional",
            ValueSource::Default => "default",
        };
        write!(f, "{name}")
    }
}

/// A bound option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionResult {
    option: CommandOption,
    value: Option<OptionValue>,
    raw: Option<String>,
    source: ValueSource,
}

impl OptionResult {
    pub fn new(
        option: CommandOption,
        value: Option<OptionValue>,
        raw: Option<String>,
        source: ValueSource,
    ) -> Self {
        Self {
            option,
            value,
            raw,
            source,
        }
    }

    pub fn option(&self) -> &CommandOption {
        &self.option
    }

    /// Converted value. Holds the raw string when conversion failed.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value.as_ref()
    }

    /// Bound words joined with `,`.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn source(&self) -> ValueSource {
        self.source
    }

    /// Whether the user supplied the value (not a default).
    pub fn is_explicit(&self) -> bool {
        self.source != ValueSource::Default
    }
}

impl Serialize for OptionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OptionResult", 4)?;
        state.serialize_field("option", &self.option.display_name())?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("raw", &self.raw)?;
        state.serialize_field("source", &self.source)?;
        state.end()
    }
}

/// An un-nested word, ranked among the command's arguments.
///
/// `position` restarts at 0 after a `--`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentResult {
    pub value: String,
    pub position: usize,
}

/// A directive given before the command path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveResult {
    pub name: String,
    pub value: Option<String>,
}

/// Outcome of a parse.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub(crate) registration: Option<Arc<CommandRegistration>>,
    pub(crate) option_results: Vec<OptionResult>,
    pub(crate) argument_results: Vec<ArgumentResult>,
    pub(crate) directive_results: Vec<DirectiveResult>,
    pub(crate) message_results: Vec<MessageResult>,
}

impl ParseResult {
    /// The resolved registration, `None` when no command matched.
    pub fn registration(&self) -> Option<&Arc<CommandRegistration>> {
        self.registration.as_ref()
    }

    pub fn option_results(&self) -> &[OptionResult] {
        &self.option_results
    }

    pub fn argument_results(&self) -> &[ArgumentResult] {
        &self.argument_results
    }

    pub fn directive_results(&self) -> &[DirectiveResult] {
        &self.directive_results
    }

    pub fn message_results(&self) -> &[MessageResult] {
        &self.message_results
    }

    pub fn is_resolved(&self) -> bool {
        self.registration.is_some()
    }

    pub fn has_errors(&self) -> bool {
        self.message_results.iter().any(MessageResult::is_error)
    }

    /// Find a bound option by long name, or by short name if `name` is a
    /// single character.
    pub fn option(&self, name: &str) -> Option<&OptionResult> {
        let mut chars = name.chars();
        let short = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };
        self.option_results.iter().find(|r| {
            r.option.long_names().iter().any(|l| l.as_str() == name)
                || short.is_some_and(|c| r.option.matches_short(c))
        })
    }

    /// Diagnostic codes, in order.
    pub fn codes(&self) -> Vec<u16> {
        self.message_results.iter().map(MessageResult::code).collect()
    }
}

impl PartialEq for ParseResult {
    fn eq(&self, other: &Self) -> bool {
        let same_registration = match (&self.registration, &other.registration) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_registration
            && self.option_results == other.option_results
            && self.argument_results == other.argument_results
            && self.directive_results == other.directive_results
            && self.message_results == other.message_results
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParseResult", 5)?;
        state.serialize_field("registration", &self.registration.as_deref())?;
        state.serialize_field("options", &self.option_results)?;
        state.serialize_field("arguments", &self.argument_results)?;
        state.serialize_field("directives", &self.directive_results)?;
        state.serialize_field("messages", &self.message_results)?;
        state.end()
    }
}
