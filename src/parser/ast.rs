//! parser::ast
//!
//! Folds a token stream into a small tree.
//!
//! # Shape
//!
//! ```text
//! DirectiveNode*            (terminal, before the command path)
//! CommandNode               (root word)
//!   CommandNode             (one per further path word)
//!     OptionNode            (one per OPTION token)
//!       OptionArgumentNode? (the ARGUMENT right after the option)
//! ```
//!
//! Arguments that do not immediately follow an option stay un-nested and
//! are collected in [`AstResult::arguments`] with their input positions.

use log::debug;
use serde::Serialize;

use super::token::{Token, TokenType};

/// `[name]` or `[name:value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveNode {
    pub name: String,
    pub value: Option<String>,
    pub position: usize,
}

impl DirectiveNode {
    /// Split raw bracket contents on the first `:`.
    fn from_raw(raw: &str, position: usize) -> Self {
        let (name, value) = match raw.split_once(':') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (raw, None),
        };
        Self {
            name: name.to_string(),
            value,
            position,
        }
    }
}

/// The argument word nested under an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionArgumentNode {
    pub value: String,
    pub position: usize,
}

/// An option token, as typed (`--arg1`, `-abc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionNode {
    pub name: String,
    pub position: usize,
    pub argument: Option<OptionArgumentNode>,
}

impl OptionNode {
    /// Zero or one nested argument.
    pub fn children(&self) -> &[OptionArgumentNode] {
        self.argument.as_slice()
    }
}

/// An argument not nested under an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandArgumentNode {
    pub value: String,
    pub position: usize,
    /// Whether the word came after a `--`.
    pub after_double_dash: bool,
}

/// Child of a [`CommandNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CommandChild {
    Command(CommandNode),
    Option(OptionNode),
}

/// One matched command word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandNode {
    pub command: String,
    pub position: usize,
    pub children: Vec<CommandChild>,
}

impl CommandNode {
    fn new(command: &str, position: usize) -> Self {
        Self {
            command: command.to_string(),
            position,
            children: Vec::new(),
        }
    }

    /// The nested sub-command, if any.
    pub fn sub_command(&self) -> Option<&CommandNode> {
        self.children.iter().find_map(|child| match child {
            CommandChild::Command(node) => Some(node),
            CommandChild::Option(_) => None,
        })
    }

    /// Options attached directly to this command.
    pub fn options(&self) -> impl Iterator<Item = &OptionNode> {
        self.children.iter().filter_map(|child| match child {
            CommandChild::Option(node) => Some(node),
            CommandChild::Command(_) => None,
        })
    }
}

/// Output of [`AstBuilder::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AstResult {
    /// The root command node (at most one).
    pub nonterminal_nodes: Vec<CommandNode>,
    /// Directive nodes, in input order.
    pub terminal_nodes: Vec<DirectiveNode>,
    /// Un-nested arguments, in input order.
    pub arguments: Vec<CommandArgumentNode>,
    /// Position of the `--` token, if any.
    pub double_dash: Option<usize>,
}

impl AstResult {
    fn deepest(&self) -> Option<&CommandNode> {
        let mut node = self.nonterminal_nodes.first()?;
        while let Some(next) = node.sub_command() {
            node = next;
        }
        Some(node)
    }

    /// Command words of the matched path, as typed.
    pub fn command_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut node = self.nonterminal_nodes.first();
        while let Some(current) = node {
            path.push(current.command.as_str());
            node = current.sub_command();
        }
        path
    }

    /// Options of the deepest command, in input order.
    pub fn options(&self) -> Vec<&OptionNode> {
        self.deepest()
            .map(|node| node.options().collect())
            .unwrap_or_default()
    }
}

/// Builds an [`AstResult`] from tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstBuilder;

impl AstBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, tokens: &[Token]) -> AstResult {
        let mut result = AstResult::default();
        let mut chain: Vec<CommandNode> = Vec::new();
        let mut previous: Option<TokenType> = None;

        for token in tokens {
            match token.token_type() {
                TokenType::Directive => {
                    result
                        .terminal_nodes
                        .push(DirectiveNode::from_raw(token.value(), token.position()));
                }
                TokenType::Command => {
                    chain.push(CommandNode::new(token.value(), token.position()));
                }
                TokenType::Option => match chain.last_mut() {
                    Some(command) => command.children.push(CommandChild::Option(OptionNode {
                        name: token.value().to_string(),
                        position: token.position(),
                        argument: None,
                    })),
                    // The lexer only classifies options after a command word
                    None => debug!("option '{}' outside any command dropped", token.value()),
                },
                TokenType::Argument => {
                    let nested = previous == Some(TokenType::Option)
                        && nest_under_last_option(&mut chain, token);
                    if !nested {
                        result.arguments.push(CommandArgumentNode {
                            value: token.value().to_string(),
                            position: token.position(),
                            after_double_dash: result.double_dash.is_some(),
                        });
                    }
                }
                TokenType::DoubleDash => {
                    result.double_dash = Some(token.position());
                }
            }
            previous = Some(token.token_type());
        }

        // Fold the flat chain into nested nodes, deepest first
        let mut folded: Option<CommandNode> = None;
        while let Some(mut node) = chain.pop() {
            if let Some(child) = folded.take() {
                node.children.insert(0, CommandChild::Command(child));
            }
            folded = Some(node);
        }
        result.nonterminal_nodes.extend(folded);

        debug!(
            "ast: path {:?}, {} option(s), {} argument(s), {} directive(s)",
            result.command_path(),
            result.options().len(),
            result.arguments.len(),
            result.terminal_nodes.len()
        );
        result
    }
}

fn nest_under_last_option(chain: &mut [CommandNode], token: &Token) -> bool {
    let Some(command) = chain.last_mut() else {
        return false;
    };
    match command.children.last_mut() {
        Some(CommandChild::Option(option)) if option.argument.is_none() => {
            option.argument = Some(OptionArgumentNode {
                value: token.value().to_string(),
                position: token.position(),
            });
            true
        }
        _ => false,
    }
}
