//! parser::token
//!
//! Classified units of input.

use serde::Serialize;

/// Kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Command,
    Option,
    Argument,
    Directive,
    #[serde(rename = "DOUBLEDASH")]
    DoubleDash,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenType::Command => "COMMAND",
            TokenType::Option => "OPTION",
            TokenType::Argument => "ARGUMENT",
            TokenType::Directive => "DIRECTIVE",
            TokenType::DoubleDash => "DOUBLEDASH",
        };
        f.write_str(name)
    }
}

/// A classified input word.
///
/// `position` is the index of the word in the input sequence, not a
/// character offset. Directive tokens hold the bracket contents
/// (`name` or `name:value`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    value: String,
    #[serde(rename = "type")]
    token_type: TokenType,
    position: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, token_type: TokenType, position: usize) -> Self {
        Self {
            value: value.into(),
            token_type,
            position,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) @{}", self.token_type, self.value, self.position)
    }
}
