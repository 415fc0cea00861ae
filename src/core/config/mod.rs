//! core::config
//!
//! Parser feature toggles and configuration file loading.
//!
//! # Features
//!
//! [`ParserConfig`] is a small `Copy` value holding independent
//! [`Feature`] toggles:
//!
//! | Feature | Default |
//! |---|---|
//! | `CaseSensitiveCommands` | on |
//! | `CaseSensitiveOptions` | on |
//! | `AllowDirectives` | off |
//! | `IgnoreDirectives` | off |
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. Explicit path passed to [`Config::load`]
//! 2. `$CMDTREE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/cmdtree/config.toml`
//! 4. `~/.cmdtree/config.toml`
//!
//! Missing files are not an error; defaults are used.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::config::{Feature, ParserConfig};
//!
//! let config = ParserConfig::default()
//!     .disable(Feature::CaseSensitiveCommands)
//!     .enable(Feature::AllowDirectives);
//!
//! assert!(!config.is_enabled(Feature::CaseSensitiveCommands));
//! assert_eq!(config.normalize_command("ROOT1"), "root1");
//! assert_eq!(config.normalize_option("Arg"), "Arg");
//! ```

pub mod schema;

pub use schema::{ConfigFile, ManifestSettings, ParserSettings};

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The file that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// An independent parser behaviour toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Command words match registrations case-sensitively.
    CaseSensitiveCommands,
    /// Option names match declared names case-sensitively.
    CaseSensitiveOptions,
    /// `[name]` / `[name:value]` words before the command path are directives.
    AllowDirectives,
    /// Drop unrecognised content before the command path instead of reporting it.
    IgnoreDirectives,
}

impl Feature {
    /// All features, in declaration order.
    pub const ALL: [Feature; 4] = [
        Feature::CaseSensitiveCommands,
        Feature::CaseSensitiveOptions,
        Feature::AllowDirectives,
        Feature::IgnoreDirectives,
    ];

    /// Whether the feature is on in [`ParserConfig::default`].
    pub fn default_enabled(self) -> bool {
        matches!(
            self,
            Feature::CaseSensitiveCommands | Feature::CaseSensitiveOptions
        )
    }

    fn mask(self) -> u8 {
        match self {
            Feature::CaseSensitiveCommands => 1,
            Feature::CaseSensitiveOptions => 1 << 1,
            Feature::AllowDirectives => 1 << 2,
            Feature::IgnoreDirectives => 1 << 3,
        }
    }

    /// Config file key for this feature.
    pub fn key(self) -> &'static str {
        match self {
            Feature::CaseSensitiveCommands => "case_sensitive_commands",
            Feature::CaseSensitiveOptions => "case_sensitive_options",
            Feature::AllowDirectives => "allow_directives",
            Feature::IgnoreDirectives => "ignore_directives",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Parser configuration: a set of enabled [`Feature`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParserConfig {
    enabled: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let enabled = Feature::ALL
            .iter()
            .filter(|f| f.default_enabled())
            .fold(0, |acc, f| acc | f.mask());
        Self { enabled }
    }
}

impl ParserConfig {
    /// Configuration with every feature off.
    pub fn none() -> Self {
        Self { enabled: 0 }
    }

    /// Return a copy with `feature` turned on.
    pub fn enable(self, feature: Feature) -> Self {
        self.set(feature, true)
    }

    /// Return a copy with `feature` turned off.
    pub fn disable(self, feature: Feature) -> Self {
        self.set(feature, false)
    }

    /// Return a copy with `feature` set to `enabled`.
    pub fn set(self, feature: Feature, enabled: bool) -> Self {
        let enabled = if enabled {
            self.enabled | feature.mask()
        } else {
            self.enabled & !feature.mask()
        };
        Self { enabled }
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled & feature.mask() != 0
    }

    /// Normalize a command word for model insertion and lookup.
    pub fn normalize_command<'a>(&self, word: &'a str) -> Cow<'a, str> {
        fold(word, self.is_enabled(Feature::CaseSensitiveCommands))
    }

    /// Normalize an option name for matching against declared names.
    pub fn normalize_option<'a>(&self, name: &'a str) -> Cow<'a, str> {
        fold(name, self.is_enabled(Feature::CaseSensitiveOptions))
    }
}

fn fold(word: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || !word.chars().any(char::is_uppercase) {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(word.to_lowercase())
    }
}

impl std::fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = f.debug_set();
        for feature in Feature::ALL {
            if self.is_enabled(feature) {
                set.entry(&feature);
            }
        }
        set.finish()
    }
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The parsed file contents (defaults when no file was found)
    pub file: ConfigFile,
    /// Path the file was loaded from
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` or the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. An explicit path that does not exist is a read error.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_default(),
        };

        let Some(path) = path else {
            debug!("no config file found, using defaults");
            return Ok(ConfigLoadResult {
                config: Config::default(),
                warnings: Vec::new(),
            });
        };

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        let file = Self::parse_file(&path, &contents)?;
        debug!("loaded config from {}", path.display());

        let warnings = Self::check(&file, &path);
        for warning in &warnings {
            warn!("{}: {}", warning.path.display(), warning.message);
        }

        Ok(ConfigLoadResult {
            config: Config {
                file,
                loaded_from: Some(path),
            },
            warnings,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Config, ConfigError> {
        let file = Self::parse_file(Path::new("<inline>"), contents)?;
        Ok(Config {
            file,
            loaded_from: None,
        })
    }

    fn parse_file(path: &Path, contents: &str) -> Result<ConfigFile, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    fn find_default() -> Option<PathBuf> {
        // 1. $CMDTREE_CONFIG
        if let Ok(path) = std::env::var("CMDTREE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. $XDG_CONFIG_HOME/cmdtree/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("cmdtree/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. ~/.cmdtree/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".cmdtree/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    fn check(file: &ConfigFile, path: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if let Some(parser) = &file.parser {
            if parser.allow_directives == Some(true) && parser.ignore_directives == Some(true) {
                warnings.push(ConfigWarning {
                    message: "ignore_directives has no effect while allow_directives is enabled"
                        .into(),
                    path: path.to_path_buf(),
                });
            }
        }
        warnings
    }

    /// Parser configuration with file settings applied over the defaults.
    pub fn parser(&self) -> ParserConfig {
        match &self.file.parser {
            Some(settings) => settings.apply(ParserConfig::default()),
            None => ParserConfig::default(),
        }
    }

    /// Default manifest path, if configured.
    pub fn manifest_path(&self) -> Option<&Path> {
        self.file.manifest.as_ref().and_then(|m| m.path.as_deref())
    }

    /// Path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod parser_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = ParserConfig::default();
            assert!(config.is_enabled(Feature::CaseSensitiveCommands));
            assert!(config.is_enabled(Feature::CaseSensitiveOptions));
            assert!(!config.is_enabled(Feature::AllowDirectives));
            assert!(!config.is_enabled(Feature::IgnoreDirectives));
        }

        #[test]
        fn toggles_are_independent() {
            let config = ParserConfig::none()
                .enable(Feature::AllowDirectives)
                .enable(Feature::IgnoreDirectives)
                .disable(Feature::AllowDirectives);

            assert!(!config.is_enabled(Feature::AllowDirectives));
            assert!(config.is_enabled(Feature::IgnoreDirectives));
            assert!(!config.is_enabled(Feature::CaseSensitiveCommands));
        }

        #[test]
        fn normalize_respects_case_features() {
            let sensitive = ParserConfig::default();
            assert_eq!(sensitive.normalize_command("Root1"), "Root1");

            let insensitive = sensitive
                .disable(Feature::CaseSensitiveCommands)
                .disable(Feature::CaseSensitiveOptions);
            assert_eq!(insensitive.normalize_command("Root1"), "root1");
            assert_eq!(insensitive.normalize_option("ARG1"), "arg1");
        }

        #[test]
        fn debug_lists_enabled_features() {
            let rendered = format!("{:?}", ParserConfig::default());
            assert!(rendered.contains("CaseSensitiveCommands"));
            assert!(!rendered.contains("AllowDirectives"));
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn explicit_path_loaded() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("config.toml");
            fs::write(
                &path,
                r#"
                [parser]
                case_sensitive_commands = false
                "#,
            )
            .unwrap();

            let result = Config::load(Some(&path)).unwrap();
            let parser = result.config.parser();

            assert!(!parser.is_enabled(Feature::CaseSensitiveCommands));
            assert!(parser.is_enabled(Feature::CaseSensitiveOptions));
            assert_eq!(result.config.loaded_from(), Some(path.as_path()));
            assert!(result.warnings.is_empty());
        }

        #[test]
        fn missing_explicit_path_is_error() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("nope.toml");
            assert!(matches!(
                Config::load(Some(&path)),
                Err(ConfigError::ReadError { .. })
            ));
        }

        #[test]
        fn malformed_file_is_parse_error() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("config.toml");
            fs::write(&path, "[parser\n").unwrap();

            assert!(matches!(
                Config::load(Some(&path)),
                Err(ConfigError::ParseError { .. })
            ));
        }

        #[test]
        fn ignore_with_allow_warns() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("config.toml");
            fs::write(
                &path,
                r#"
                [parser]
                allow_directives = true
                ignore_directives = true
                "#,
            )
            .unwrap();

            let result = Config::load(Some(&path)).unwrap();
            assert_eq!(result.warnings.len(), 1);
            assert!(result.warnings[0].message.contains("no effect"));
        }

        #[test]
        fn manifest_path_exposed() {
            let config = Config::from_toml_str(
                r#"
                [manifest]
                path = "/tmp/commands.toml"
                "#,
            )
            .unwrap();
            assert_eq!(
                config.manifest_path(),
                Some(Path::new("/tmp/commands.toml"))
            );
        }

        #[test]
        fn no_parser_section_uses_defaults() {
            let config = Config::from_toml_str("").unwrap();
            assert_eq!(config.parser(), ParserConfig::default());
        }
    }
}
