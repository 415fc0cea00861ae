//! parser::lexer
//!
//! Classifies input words into [`Token`]s.
//!
//! # Algorithm
//!
//! The input is split at the first word that names a root command.
//!
//! Words before the split can only be directives. With
//! [`Feature::AllowDirectives`] each `[name]` or `[name:value]` group
//! becomes a `DIRECTIVE` token until the first other non-blank word; that
//! word and everything after it up to the split is one illegal content
//! message (1000).
//! Without it, the whole prefix is reported as one 1000 unless
//! [`Feature::IgnoreDirectives`] is set, in which case it is dropped.
//!
//! Words from the split on are matched against the model: consecutive
//! child command words become `COMMAND` tokens, a bare `--` becomes
//! `DOUBLEDASH` and turns every later word into an `ARGUMENT`, and the
//! rest are `OPTION` or `ARGUMENT` by shape:
//!
//! | Word | Token |
//! |---|---|
//! | `--abc` | `OPTION` |
//! | `-a`, `-ab`, `-abc` | `OPTION` |
//! | `-1`, `-1a`, `-a1`, `-ab1c`, `-` | `ARGUMENT` |
//! | anything else | `ARGUMENT` |
//!
//! A leading `--` is always reported as 1000.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use super::message::{MessageResult, ParserMessage};
use super::model::{CommandModel, ModelNode};
use super::token::{Token, TokenType};
use crate::core::config::Feature;

/// Tokens and lexer-level diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexerResult {
    pub tokens: Vec<Token>,
    pub messages: Vec<MessageResult>,
}

/// Word classifier bound to a command model.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    model: &'a CommandModel,
}

static DIRECTIVE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[[^\[\]:]+(?::[^\[\]]*)?\])+$").expect("valid directive word pattern")
});

static DIRECTIVE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("valid directive group pattern"));

/// Classify a word that is neither a command nor `--`.
///
/// `-` followed only by letters is a POSIX short-option bundle; a dash
/// followed by anything containing a non-letter is an argument (negative
/// numbers, `-a1`).
pub fn classify_word(word: &str) -> TokenType {
    if word.starts_with("--") {
        return TokenType::Option;
    }
    match word.strip_prefix('-') {
        Some(rest) if !rest.is_empty() && rest.chars().all(char::is_alphabetic) => {
            TokenType::Option
        }
        _ => TokenType::Argument,
    }
}

impl<'a> Lexer<'a> {
    pub fn new(model: &'a CommandModel) -> Self {
        Self { model }
    }

    /// Tokenize `words`.
    pub fn tokenize<S: AsRef<str>>(&self, words: &[S]) -> LexerResult {
        let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        debug!("tokenizing {:?}", words);

        let mut result = LexerResult::default();

        if words.first() == Some(&"--") {
            result.messages.push(MessageResult::new(
                ParserMessage::IllegalContentBeforeCommands {
                    content: "--".to_string(),
                },
                0,
            ));
        }

        let split = words
            .iter()
            .position(|w| self.model.root_command(w).is_some())
            .unwrap_or(words.len());

        self.lex_prefix(&words[..split], &mut result);
        self.lex_commands(&words[split..], split, &mut result);

        debug!("generated tokens {:?}", result.tokens);
        result
    }

    fn lex_prefix(&self, before: &[&str], result: &mut LexerResult) {
        if before.is_empty() {
            return;
        }
        let config = self.model.config();

        if config.is_enabled(Feature::AllowDirectives) {
            for (position, word) in before.iter().enumerate() {
                if word.trim().is_empty() {
                    continue;
                }
                if !DIRECTIVE_WORD.is_match(word) {
                    // Directives end at the first other word
                    result.messages.push(MessageResult::new(
                        ParserMessage::IllegalContentBeforeCommands {
                            content: before[position..].join(" "),
                        },
                        position,
                    ));
                    break;
                }
                for group in DIRECTIVE_GROUP.captures_iter(word) {
                    trace!("directive '{}' at {}", &group[1], position);
                    result
                        .tokens
                        .push(Token::new(&group[1], TokenType::Directive, position));
                }
            }
        } else if config.is_enabled(Feature::IgnoreDirectives) {
            debug!("ignoring content before commands {:?}", before);
        } else {
            result.messages.push(MessageResult::new(
                ParserMessage::IllegalContentBeforeCommands {
                    content: before.join(" "),
                },
                0,
            ));
        }
    }

    fn lex_commands(&self, after: &[&str], offset: usize, result: &mut LexerResult) {
        let mut node: Option<&ModelNode> = None;
        let mut in_path = true;
        let mut after_double_dash = false;

        for (i, word) in after.iter().enumerate() {
            let position = offset + i;

            if after_double_dash {
                result
                    .tokens
                    .push(Token::new(*word, TokenType::Argument, position));
                continue;
            }
            if *word == "--" {
                result
                    .tokens
                    .push(Token::new(*word, TokenType::DoubleDash, position));
                after_double_dash = true;
                continue;
            }

            if in_path {
                let next = match node {
                    None => self.model.root_command(word),
                    Some(current) => self.model.next_node(current, word),
                };
                if let Some(next) = next {
                    node = Some(next);
                    result
                        .tokens
                        .push(Token::new(*word, TokenType::Command, position));
                    continue;
                }
                in_path = false;
            }

            let token_type = classify_word(word);
            trace!("'{}' at {} is {}", word, position, token_type);
            result.tokens.push(Token::new(*word, token_type, position));
        }
    }
}
