//! parser::model
//!
//! The command model: a trie of command words built once from the
//! registration set.
//!
//! # Structure
//!
//! Each [`ModelNode`] is one command word. A node may own a registration,
//! have children, or both (`root2` registered alongside `root2 sub1 sub2`
//! gives a registered node whose child `sub1` has none of its own).
//!
//! Keys are normalized with [`ParserConfig::normalize_command`] on insert
//! and on lookup, so case-insensitive models fold both sides the same way.
//!
//! # Invariants
//!
//! - At most one registration per path (aliases included)
//! - The model is immutable once built; rebuild to change it

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use super::token::{Token, TokenType};
use crate::core::config::ParserConfig;
use crate::core::registration::CommandRegistration;
use crate::core::types::CommandPath;

/// Errors from building a command model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("command path '{path}' is registered more than once")]
    DuplicatePath { path: String },
}

/// One command word in the model.
#[derive(Debug, Clone)]
pub struct ModelNode {
    segment: String,
    registration: Option<Arc<CommandRegistration>>,
    children: BTreeMap<String, ModelNode>,
}

impl ModelNode {
    fn new(segment: String) -> Self {
        Self {
            segment,
            registration: None,
            children: BTreeMap::new(),
        }
    }

    /// The (normalized) command word.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The registration bound at exactly this path.
    pub fn registration(&self) -> Option<&Arc<CommandRegistration>> {
        self.registration.as_ref()
    }

    /// Look up a child by its already-normalized key.
    pub fn child(&self, key: &str) -> Option<&ModelNode> {
        self.children.get(key)
    }

    pub fn children(&self) -> impl Iterator<Item = &ModelNode> {
        self.children.values()
    }

    /// Tokens that may follow this node: child commands, plus the option
    /// spellings of this node's registration.
    pub fn valid_tokens(&self) -> BTreeMap<String, Token> {
        let mut tokens: BTreeMap<String, Token> = self
            .children
            .keys()
            .map(|key| (key.clone(), Token::new(key.clone(), TokenType::Command, 0)))
            .collect();

        if let Some(registration) = &self.registration {
            for option in registration.options() {
                for spelling in option.spellings() {
                    tokens.insert(
                        spelling.clone(),
                        Token::new(spelling, TokenType::Option, 0),
                    );
                }
            }
        }
        tokens
    }
}

/// Result of resolving a word sequence against the model.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Deepest node matched.
    pub node: &'a ModelNode,
    /// Registration at `node`, or the closest registered ancestor.
    pub registration: Option<&'a Arc<CommandRegistration>>,
    /// Number of words matched.
    pub depth: usize,
}

/// The command trie.
#[derive(Debug, Clone, Default)]
pub struct CommandModel {
    roots: BTreeMap<String, ModelNode>,
    config: ParserConfig,
}

impl CommandModel {
    /// A model with no commands.
    pub fn empty(config: ParserConfig) -> Self {
        Self {
            roots: BTreeMap::new(),
            config,
        }
    }

    /// Build a model from registrations.
    ///
    /// Each registration is inserted at its path and at every alias path.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DuplicatePath` if two registrations (or
    /// aliases) land on the same path after normalization.
    pub fn build<I>(registrations: I, config: ParserConfig) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = Arc<CommandRegistration>>,
    {
        let mut model = Self::empty(config);

        for registration in registrations {
            model.insert(registration.path(), &registration)?;
            for alias in registration.aliases() {
                model.insert(&alias.path, &registration)?;
            }
        }

        debug!("built command model with {} root command(s)", model.roots.len());
        Ok(model)
    }

    fn insert(
        &mut self,
        path: &CommandPath,
        registration: &Arc<CommandRegistration>,
    ) -> Result<(), ModelError> {
        let config = self.config;
        let mut segments = path
            .segments()
            .iter()
            .map(|s| config.normalize_command(s).into_owned());

        // CommandPath guarantees at least one segment
        let Some(first) = segments.next() else {
            return Ok(());
        };
        let mut node = self
            .roots
            .entry(first.clone())
            .or_insert_with(|| ModelNode::new(first));
        for key in segments {
            node = node
                .children
                .entry(key.clone())
                .or_insert_with(|| ModelNode::new(key));
        }

        if node.registration.is_some() {
            return Err(ModelError::DuplicatePath {
                path: path.to_string(),
            });
        }
        node.registration = Some(Arc::clone(registration));
        Ok(())
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Top-level nodes, keyed by normalized command word.
    pub fn roots(&self) -> impl Iterator<Item = &ModelNode> {
        self.roots.values()
    }

    /// The top-level vocabulary: one `COMMAND` token per root word.
    pub fn valid_root_tokens(&self) -> BTreeMap<String, Token> {
        self.roots
            .keys()
            .map(|key| (key.clone(), Token::new(key.clone(), TokenType::Command, 0)))
            .collect()
    }

    /// Look up a root node by input word.
    pub fn root_command(&self, word: &str) -> Option<&ModelNode> {
        self.roots.get(self.config.normalize_command(word).as_ref())
    }

    /// Look up the child of `node` matching an input word.
    pub fn next_node<'a>(&self, node: &'a ModelNode, word: &str) -> Option<&'a ModelNode> {
        node.child(self.config.normalize_command(word).as_ref())
    }

    /// Walk the trie word by word.
    ///
    /// Stops at the first word that is not a child of the current node.
    /// Returns `None` only when the first word is not a root command.
    pub fn resolve<S: AsRef<str>>(&self, words: &[S]) -> Option<Resolved<'_>> {
        let (first, rest) = words.split_first()?;
        let mut node = self.root_command(first.as_ref())?;
        let mut registration = node.registration.as_ref();
        let mut depth = 1;

        for word in rest {
            let Some(next) = self.next_node(node, word.as_ref()) else {
                break;
            };
            node = next;
            depth += 1;
            if next.registration.is_some() {
                registration = next.registration.as_ref();
            }
        }

        Some(Resolved {
            node,
            registration,
            depth,
        })
    }

    /// Every registration in the model, each once, in path order.
    pub fn registrations(&self) -> Vec<Arc<CommandRegistration>> {
        let mut found: Vec<Arc<CommandRegistration>> = Vec::new();
        let mut stack: Vec<&ModelNode> = self.roots.values().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(registration) = &node.registration {
                if !found.iter().any(|r| Arc::ptr_eq(r, registration)) {
                    found.push(Arc::clone(registration));
                }
            }
            stack.extend(node.children.values().rev());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Feature;
    use crate::core::option::CommandOption;
    use crate::core::registration::Target;

    fn registration(path: &str) -> Arc<CommandRegistration> {
        Arc::new(
            CommandRegistration::builder()
                .command(path)
                .target(Target::named(path))
                .build()
                .unwrap(),
        )
    }

    mod build {
        use super::*;

        #[test]
        fn duplicate_path_rejected() {
            let result = CommandModel::build(
                [registration("root1"), registration("root1")],
                ParserConfig::default(),
            );
            assert_eq!(
                result.unwrap_err(),
                ModelError::DuplicatePath {
                    path: "root1".into()
                }
            );
        }

        #[test]
        fn case_folded_duplicate_rejected() {
            let config = ParserConfig::default().disable(Feature::CaseSensitiveCommands);
            let result =
                CommandModel::build([registration("root1"), registration("ROOT1")], config);
            assert!(result.is_err());

            let sensitive = CommandModel::build(
                [registration("root1"), registration("ROOT1")],
                ParserConfig::default(),
            );
            assert!(sensitive.is_ok());
        }

        #[test]
        fn alias_inserted() {
            let aliased = Arc::new(
                CommandRegistration::builder()
                    .command("root1 sub1")
                    .alias("r1")
                    .target(Target::named("x"))
                    .build()
                    .unwrap(),
            );
            let model = CommandModel::build([aliased.clone()], ParserConfig::default()).unwrap();

            let resolved = model.resolve(&["r1"]).unwrap();
            assert!(Arc::ptr_eq(resolved.registration.unwrap(), &aliased));
            assert_eq!(model.registrations().len(), 1);
        }

        #[test]
        fn alias_collision_rejected() {
            let aliased = Arc::new(
                CommandRegistration::builder()
                    .command("root2")
                    .alias("root1")
                    .target(Target::named("x"))
                    .build()
                    .unwrap(),
            );
            let result =
                CommandModel::build([registration("root1"), aliased], ParserConfig::default());
            assert!(result.is_err());
        }
    }

    mod resolve {
        use super::*;

        fn model() -> CommandModel {
            CommandModel::build(
                [registration("root2"), registration("root2 sub1 sub2")],
                ParserConfig::default(),
            )
            .unwrap()
        }

        #[test]
        fn exact_path() {
            let model = model();
            let resolved = model.resolve(&["root2", "sub1", "sub2"]).unwrap();
            assert_eq!(resolved.depth, 3);
            assert_eq!(
                resolved.registration.unwrap().path().to_string(),
                "root2 sub1 sub2"
            );
        }

        #[test]
        fn intermediate_node_uses_closest_ancestor() {
            let model = model();
            let resolved = model.resolve(&["root2", "sub1"]).unwrap();
            assert_eq!(resolved.node.segment(), "sub1");
            assert!(resolved.node.registration().is_none());
            assert_eq!(resolved.registration.unwrap().path().to_string(), "root2");
        }

        #[test]
        fn stops_at_unknown_word() {
            let model = model();
            let resolved = model.resolve(&["root2", "nope", "sub1"]).unwrap();
            assert_eq!(resolved.depth, 1);
            assert_eq!(resolved.registration.unwrap().path().to_string(), "root2");
        }

        #[test]
        fn unknown_root_fails() {
            assert!(model().resolve(&["root9"]).is_none());
            assert!(model().resolve::<&str>(&[]).is_none());
        }

        #[test]
        fn unregistered_parent_resolves_without_registration() {
            let model =
                CommandModel::build([registration("root3 sub1")], ParserConfig::default())
                    .unwrap();
            let resolved = model.resolve(&["root3"]).unwrap();
            assert!(resolved.registration.is_none());
        }

        #[test]
        fn case_insensitive_lookup() {
            let config = ParserConfig::default().disable(Feature::CaseSensitiveCommands);
            let model = CommandModel::build([registration("Root1 Sub1")], config).unwrap();

            assert!(model.root_command("ROOT1").is_some());
            let resolved = model.resolve(&["root1", "SUB1"]).unwrap();
            assert_eq!(resolved.depth, 2);
            assert!(resolved.registration.is_some());
        }
    }

    mod tokens {
        use super::*;

        #[test]
        fn root_tokens_are_commands() {
            let model = CommandModel::build(
                [registration("root1"), registration("root2 sub1")],
                ParserConfig::default(),
            )
            .unwrap();

            let tokens = model.valid_root_tokens();
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens["root1"].token_type(), TokenType::Command);
            assert_eq!(tokens["root2"].value(), "root2");
        }

        #[test]
        fn node_tokens_include_options() {
            let reg = Arc::new(
                CommandRegistration::builder()
                    .command("root1")
                    .option(CommandOption::builder().long("arg1").short('a'))
                    .target(Target::named("x"))
                    .build()
                    .unwrap(),
            );
            let model =
                CommandModel::build([reg, registration("root1 sub1")], ParserConfig::default())
                    .unwrap();

            let tokens = model.root_command("root1").unwrap().valid_tokens();
            assert_eq!(tokens["sub1"].token_type(), TokenType::Command);
            assert_eq!(tokens["--arg1"].token_type(), TokenType::Option);
            assert_eq!(tokens["-a"].token_type(), TokenType::Option);
        }
    }
}
