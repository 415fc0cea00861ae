//! core
//!
//! Registration-side domain types for cmdtree.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommandPath, LongName, ShortName
//! - [`option`] - Declared options, value types and arity
//! - [`registration`] - Command registrations, targets and aliases
//! - [`config`] - Parser features and config file loading
//! - [`manifest`] - Declarative TOML command manifests
//! - [`catalog`] - Mutable registry producing shared command models
//!
//! # Design Principles
//!
//! - Invalid registrations are rejected at construction, never at parse time
//! - Everything built here is immutable and cheap to share

pub mod catalog;
pub mod config;
pub mod manifest;
pub mod option;
pub mod registration;
pub mod types;
