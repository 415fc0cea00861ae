//! parser::message
//!
//! Parse diagnostics.
//!
//! # Codes
//!
//! Codes in the `1xxx` range come from the lexer, `2xxx` from binding.
//! Codes are stable and intended for tests and tooling to match on.
//!
//! | Code | Variant |
//! |---|---|
//! | 1000 | [`ParserMessage::IllegalContentBeforeCommands`] |
//! | 2000 | [`ParserMessage::MandatoryOptionMissing`] |
//! | 2001 | [`ParserMessage::UnrecognisedOption`] |
//! | 2002 | [`ParserMessage::IllegalOptionValue`] |
//! | 2003 | [`ParserMessage::NotEnoughOptionArguments`] |
//! | 2004 | [`ParserMessage::TooManyArguments`] |
//!
//! # Example
//!
//! ```
//! use cmdtree::parser::message::{MessageResult, ParserMessage};
//!
//! let message = MessageResult::new(
//!     ParserMessage::UnrecognisedOption { option: "--nope".into() },
//!     1,
//! );
//! assert_eq!(message.to_string(), "2001E:(pos 1): Unrecognised option '--nope'");
//! assert_eq!(message.text(), "Unrecognised option '--nope'");
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// How serious a diagnostic is.
///
/// Errors mean the parse result should not be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    /// Reserved for the `W` marker of the message format. No
    /// [`ParserMessage`] has this severity today.
    Warning,
}

impl Severity {
    /// Single-letter marker used in formatted messages.
    pub fn letter(&self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

fn description_suffix(description: &Option<String>) -> String {
    match description {
        Some(d) if !d.is_empty() => format!(", {d}"),
        _ => String::new(),
    }
}

/// A diagnostic produced while lexing or binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserMessage {
    /// Words before the command path that are not usable directives.
    #[error("Illegal content before commands '{content}'")]
    IllegalContentBeforeCommands { content: String },

    /// A required option was neither given nor defaulted.
    #[error("Missing mandatory option '{option}'{}", description_suffix(.description))]
    MandatoryOptionMissing {
        /// `--long` or `-s` spelling.
        option: String,
        description: Option<String>,
    },

    /// An option token matched no declared option.
    #[error("Unrecognised option '{option}'")]
    UnrecognisedOption { option: String },

    /// A value could not be converted to the option's type.
    #[error("Illegal option value '{value}', reason '{reason}'")]
    IllegalOptionValue { value: String, reason: String },

    /// Fewer words than the option's minimum arity.
    #[error(
        "Not enough arguments for option '{option}', requires at least '{required}' but got '{available}'"
    )]
    NotEnoughOptionArguments {
        option: String,
        required: usize,
        available: usize,
    },

    /// Words left over after every positional slot was filled.
    #[error("Too many arguments, '{words}' could not be bound")]
    TooManyArguments { words: String },
}

impl ParserMessage {
    /// Stable numeric code.
    pub fn code(&self) -> u16 {
        match self {
            ParserMessage::IllegalContentBeforeCommands { .. } => 1000,
            ParserMessage::MandatoryOptionMissing { .. } => 2000,
            ParserMessage::UnrecognisedOption { .. } => 2001,
            ParserMessage::IllegalOptionValue { .. } => 2002,
            ParserMessage::NotEnoughOptionArguments { .. } => 2003,
            ParserMessage::TooManyArguments { .. } => 2004,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Template arguments, in template order.
    pub fn inserts(&self) -> Vec<String> {
        match self {
            ParserMessage::IllegalContentBeforeCommands { content } => vec![content.clone()],
            ParserMessage::MandatoryOptionMissing {
                option,
                description,
            } => vec![option.clone(), description_suffix(description)],
            ParserMessage::UnrecognisedOption { option } => vec![option.clone()],
            ParserMessage::IllegalOptionValue { value, reason } => {
                vec![value.clone(), reason.clone()]
            }
            ParserMessage::NotEnoughOptionArguments {
                option,
                required,
                available,
            } => vec![option.clone(), required.to_string(), available.to_string()],
            ParserMessage::TooManyArguments { words } => vec![words.clone()],
        }
    }
}

/// A diagnostic anchored at a word position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResult {
    message: ParserMessage,
    position: usize,
}

impl MessageResult {
    pub fn new(message: ParserMessage, position: usize) -> Self {
        Self { message, position }
    }

    pub fn message(&self) -> &ParserMessage {
        &self.message
    }

    /// Word index of the offending input, `0` when there is none.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn code(&self) -> u16 {
        self.message.code()
    }

    pub fn severity(&self) -> Severity {
        self.message.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Message text without the code and position prefix.
    pub fn text(&self) -> String {
        self.message.to_string()
    }
}

impl std::fmt::Display for MessageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}:(pos {}): {}",
            self.code(),
            self.severity().letter(),
            self.position,
            self.message
        )
    }
}

impl Serialize for MessageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MessageResult", 4)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("position", &self.position)?;
        state.serialize_field("text", &self.text())?;
        state.end()
    }
}
