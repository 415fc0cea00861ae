//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Location
//!
//! Searched in order:
//! 1. Explicit path (the binary's `--config`)
//! 2. `$CMDTREE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/cmdtree/config.toml`
//! 4. `~/.cmdtree/config.toml`
//!
//! # Validation
//!
//! Every key is optional; unset keys keep the built-in defaults. Unknown
//! keys are rejected so typos surface instead of silently doing nothing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Feature, ParserConfig};

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// [parser]
/// case_sensitive_commands = false
/// allow_directives = true
///
/// [manifest]
/// path = "/home/me/.cmdtree/commands.toml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Parser feature toggles
    pub parser: Option<ParserSettings>,

    /// Default command manifest
    pub manifest: Option<ManifestSettings>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(manifest) = &self.manifest {
            manifest.validate()?;
        }
        Ok(())
    }
}

/// `[parser]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSettings {
    pub case_sensitive_commands: Option<bool>,
    pub case_sensitive_options: Option<bool>,
    pub allow_directives: Option<bool>,
    pub ignore_directives: Option<bool>,
}

impl ParserSettings {
    /// Apply the keys that are set on top of `base`.
    pub fn apply(&self, base: ParserConfig) -> ParserConfig {
        let mut config = base;
        let keys = [
            (Feature::CaseSensitiveCommands, self.case_sensitive_commands),
            (Feature::CaseSensitiveOptions, self.case_sensitive_options),
            (Feature::AllowDirectives, self.allow_directives),
            (Feature::IgnoreDirectives, self.ignore_directives),
        ];
        for (feature, value) in keys {
            if let Some(enabled) = value {
                config = config.set(feature, enabled);
            }
        }
        config
    }
}

/// `[manifest]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSettings {
    /// Manifest used when the binary gets no `--manifest`
    pub path: Option<PathBuf>,
}

impl ManifestSettings {
    /// Validate the section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest.path cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}
