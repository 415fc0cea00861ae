//! cmdtree - Command tree parsing for interactive shells and CLIs
//!
//! A host application declares a tree of commands (nested sub-commands,
//! named options, positional arguments). Given a sequence of already-split
//! input words, cmdtree determines which command was invoked and what values
//! bind to its options, producing either a resolved, type-converted
//! invocation or a precise set of diagnostics.
//!
//! # Architecture
//!
//! - [`core`] - Registrations, option specs, configuration, catalog, manifests
//! - [`parser`] - Lexer -> AST builder -> binder pipeline
//! - [`cli`] - The `cmdtree` developer binary (inspect tokens and bindings)
//! - [`ui`] - Output helpers for the binary
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cmdtree::core::config::ParserConfig;
//! use cmdtree::core::option::CommandOption;
//! use cmdtree::core::registration::{CommandRegistration, Target};
//! use cmdtree::parser::{CommandModel, Parser};
//!
//! let registration = CommandRegistration::builder()
//!     .command("greet")
//!     .option(CommandOption::builder().long("name").required())
//!     .target(Target::named("greet"))
//!     .build()
//!     .unwrap();
//!
//! let model = CommandModel::build([Arc::new(registration)], ParserConfig::default()).unwrap();
//! let parser = Parser::new(Arc::new(model));
//!
//! let result = parser.parse(&["greet", "--name", "world"]);
//! assert!(result.message_results().is_empty());
//! assert_eq!(result.option("name").and_then(|o| o.raw()), Some("world"));
//! ```
//!
//! # Correctness Invariants
//!
//! 1. `parse()` never fails: every data problem is reported as a diagnostic
//! 2. Invalid registrations are rejected before any parse can happen
//! 3. The command model is immutable once built and safe to share

pub mod cli;
pub mod core;
pub mod parser;
pub mod ui;
