//! ui
//!
//! Terminal output for the `cmdtree` binary.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and list formatting
//!
//! # Design
//!
//! Command handlers print through this module so `--quiet` and `--debug`
//! behave the same everywhere. The library never prints.

pub mod output;
