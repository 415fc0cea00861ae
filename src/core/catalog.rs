//! core::catalog
//!
//! A mutable registry of commands that publishes immutable model snapshots.
//!
//! # Copy-on-write
//!
//! Every change rebuilds a fresh [`CommandModel`] from the full
//! registration set and swaps the shared `Arc`. Parsers created earlier keep
//! the snapshot they hold; new parsers see the new model. A change that
//! would produce an invalid model is rejected and leaves the catalog as it
//! was.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::catalog::CommandCatalog;
//! use cmdtree::core::config::ParserConfig;
//! use cmdtree::core::registration::{CommandRegistration, Target};
//!
//! let catalog = CommandCatalog::new(ParserConfig::default());
//! let before = catalog.parser().unwrap();
//!
//! catalog
//!     .register(
//!         CommandRegistration::builder()
//!             .command("root1")
//!             .target(Target::named("root1"))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert!(!before.parse(&["root1"]).is_resolved());
//! assert!(catalog.parser().unwrap().parse(&["root1"]).is_resolved());
//! ```

use std::sync::{Arc, RwLock};

use log::debug;
use thiserror::Error;

use super::config::{Feature, ParserConfig};
use super::registration::CommandRegistration;
use super::types::CommandPath;
use crate::parser::{CommandModel, ModelError, Parser};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("command '{0}' is not registered")]
    NotRegistered(String),

    #[error("command catalog lock poisoned")]
    LockPoisoned,
}

#[derive(Debug)]
struct CatalogState {
    registrations: Vec<Arc<CommandRegistration>>,
    model: Arc<CommandModel>,
}

/// Registry of commands.
#[derive(Debug)]
pub struct CommandCatalog {
    config: ParserConfig,
    state: RwLock<CatalogState>,
}

impl CommandCatalog {
    /// Create an empty catalog.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            state: RwLock::new(CatalogState {
                registrations: Vec::new(),
                model: Arc::new(CommandModel::empty(config)),
            }),
        }
    }

    /// Create a catalog holding `registrations`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Model` if two registrations share a path.
    pub fn with_registrations<I>(config: ParserConfig, registrations: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CommandRegistration>,
    {
        let registrations: Vec<_> = registrations.into_iter().map(Arc::new).collect();
        let model = CommandModel::build(registrations.iter().cloned(), config)?;
        Ok(Self {
            config,
            state: RwLock::new(CatalogState {
                registrations,
                model: Arc::new(model),
            }),
        })
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Add a registration and publish a new model.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Model` if the path (or an alias) is taken.
    pub fn register(&self, registration: CommandRegistration) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;

        let mut registrations = state.registrations.clone();
        registrations.push(Arc::new(registration));
        let model = CommandModel::build(registrations.iter().cloned(), self.config)?;

        debug!("catalog now holds {} command(s)", registrations.len());
        state.registrations = registrations;
        state.model = Arc::new(model);
        Ok(())
    }

    /// Remove the registration at `path` and publish a new model.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotRegistered` if no registration has that
    /// path.
    pub fn unregister(&self, path: &CommandPath) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;

        let case_sensitive = self.config.is_enabled(Feature::CaseSensitiveCommands);
        let before = state.registrations.len();
        let registrations: Vec<_> = state
            .registrations
            .iter()
            .filter(|r| !r.path().matches(path, case_sensitive))
            .cloned()
            .collect();
        if registrations.len() == before {
            return Err(CatalogError::NotRegistered(path.to_string()));
        }

        let model = CommandModel::build(registrations.iter().cloned(), self.config)?;
        state.registrations = registrations;
        state.model = Arc::new(model);
        Ok(())
    }

    /// The current model snapshot.
    pub fn model(&self) -> Result<Arc<CommandModel>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(Arc::clone(&state.model))
    }

    /// A parser bound to the current model snapshot.
    pub fn parser(&self) -> Result<Parser, CatalogError> {
        Ok(Parser::new(self.model()?))
    }

    /// Registrations, in registration order.
    pub fn registrations(&self) -> Result<Vec<Arc<CommandRegistration>>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.registrations.clone())
    }
}
