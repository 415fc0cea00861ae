//! parser
//!
//! The lexer -> AST builder -> binder pipeline.
//!
//! # Modules
//!
//! - [`token`] - Classified input words
//! - [`model`] - Command trie built from registrations
//! - [`lexer`] - Word classification
//! - [`ast`] - Token stream folded into command/option nodes
//! - [`binder`] - Name, arity, positional and default binding
//! - [`convert`] - Typed option values
//! - [`message`] - Diagnostic codes and formatting
//! - [`result`] - The parse result
//!
//! # Concurrency
//!
//! A [`Parser`] holds an `Arc<CommandModel>` and never mutates it, so one
//! parser (or many clones) can serve any number of threads. Parsing is
//! synchronous and performs no I/O.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cmdtree::core::config::ParserConfig;
//! use cmdtree::core::option::{CommandOption, OptionType};
//! use cmdtree::core::registration::{CommandRegistration, Target};
//! use cmdtree::parser::{CommandModel, Parser};
//!
//! let registration = CommandRegistration::builder()
//!     .command("root4")
//!     .option(CommandOption::builder().long("arg1").required())
//!     .option(
//!         CommandOption::builder()
//!             .long("count")
//!             .option_type(OptionType::Int)
//!             .default_value("1"),
//!     )
//!     .target(Target::named("root4"))
//!     .build()
//!     .unwrap();
//! let model = CommandModel::build([Arc::new(registration)], ParserConfig::default()).unwrap();
//! let parser = Parser::new(Arc::new(model));
//!
//! let result = parser.parse(&["root4"]);
//! assert!(result.is_resolved());
//! assert_eq!(result.codes(), [2000]);
//! assert_eq!(
//!     result.message_results()[0].to_string(),
//!     "2000E:(pos 0): Missing mandatory option '--arg1'"
//! );
//! assert_eq!(result.option("count").and_then(|o| o.value()).and_then(|v| v.as_int()), Some(1));
//! ```

pub mod ast;
pub mod binder;
pub mod convert;
pub mod lexer;
pub mod message;
pub mod model;
pub mod result;
pub mod token;

pub use lexer::{Lexer, LexerResult};
pub use message::{MessageResult, ParserMessage, Severity};
pub use model::{CommandModel, ModelError, ModelNode};
pub use result::{ArgumentResult, DirectiveResult, OptionResult, ParseResult, ValueSource};
pub use token::{Token, TokenType};

use std::sync::Arc;

use log::debug;

use ast::AstBuilder;
use binder::Binder;

/// Parses word sequences against a shared command model.
#[derive(Debug, Clone)]
pub struct Parser {
    model: Arc<CommandModel>,
}

impl Parser {
    pub fn new(model: Arc<CommandModel>) -> Self {
        Self { model }
    }

    /// The model snapshot this parser uses.
    pub fn model(&self) -> &Arc<CommandModel> {
        &self.model
    }

    /// Run only the lexer.
    pub fn tokenize<S: AsRef<str>>(&self, words: &[S]) -> LexerResult {
        Lexer::new(&self.model).tokenize(words)
    }

    /// Parse `words`.
    ///
    /// Never fails: lexer and binding problems are reported in
    /// [`ParseResult::message_results`], lexer messages first. When no
    /// command matches, the result has no registration and no bindings.
    pub fn parse<S: AsRef<str>>(&self, words: &[S]) -> ParseResult {
        let lexed = self.tokenize(words);
        let ast = AstBuilder::new().generate(&lexed.tokens);

        let directive_results = ast
            .terminal_nodes
            .iter()
            .map(|node| DirectiveResult {
                name: node.name.clone(),
                value: node.value.clone(),
            })
            .collect();

        let path = ast.command_path();
        let registration = self
            .model
            .resolve(path.as_slice())
            .and_then(|resolved| resolved.registration)
            .cloned();

        let mut result = ParseResult {
            registration: None,
            option_results: Vec::new(),
            argument_results: Vec::new(),
            directive_results,
            message_results: lexed.messages,
        };

        let Some(registration) = registration else {
            debug!("no command resolved for path {:?}", path);
            return result;
        };

        debug!("resolved '{}'", registration.path());
        let binding = Binder::new(&registration, self.model.config()).bind(&ast);
        result.option_results = binding.option_results;
        result.argument_results = binding.argument_results;
        result.message_results.extend(binding.messages);
        result.registration = Some(registration);
        result
    }
}
