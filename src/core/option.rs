//! core::option
//!
//! Declared options: names, value type, arity and positional rank.
//!
//! # Arity
//!
//! Arity is how many argument words an option consumes. When not declared
//! it derives from the value type: booleans and scalars take zero or one
//! word, lists take any number.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::option::{Arity, CommandOption, OptionType};
//!
//! let option = CommandOption::builder()
//!     .long("count")
//!     .short('c')
//!     .option_type(OptionType::Int)
//!     .arity(Arity::ExactlyOne)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(option.display_name(), "--count");
//! assert_eq!(option.arity().min(), 1);
//! assert_eq!(option.arity().max(), Some(1));
//! ```

use serde::Serialize;
use thiserror::Error;

use super::types::{LongName, ShortName, TypeError};

/// Errors from option construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("option has neither a long nor a short name")]
    NoName,

    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error("invalid arity: min {min} is greater than max {max}")]
    InvalidArity { min: usize, max: usize },

    #[error("option name '{0}' declared twice")]
    DuplicateName(String),
}

/// Number of argument words an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    Zero,
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
    Range { min: usize, max: usize },
}

impl Arity {
    /// Minimum number of words.
    pub fn min(&self) -> usize {
        match self {
            Arity::Zero | Arity::ZeroOrOne | Arity::ZeroOrMore => 0,
            Arity::ExactlyOne | Arity::OneOrMore => 1,
            Arity::Range { min, .. } => *min,
        }
    }

    /// Maximum number of words, `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        match self {
            Arity::Zero => Some(0),
            Arity::ZeroOrOne | Arity::ExactlyOne => Some(1),
            Arity::ZeroOrMore | Arity::OneOrMore => None,
            Arity::Range { max, .. } => Some(*max),
        }
    }

    /// Look up a named arity such as `"one-or-more"`.
    ///
    /// Underscores and case are accepted too (`ONE_OR_MORE`).
    pub fn from_name(name: &str) -> Option<Arity> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "zero" | "none" => Some(Arity::Zero),
            "zero-or-one" => Some(Arity::ZeroOrOne),
            "exactly-one" | "one" => Some(Arity::ExactlyOne),
            "zero-or-more" => Some(Arity::ZeroOrMore),
            "one-or-more" => Some(Arity::OneOrMore),
            _ => None,
        }
    }

    /// An explicit `[min, max]` range.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::InvalidArity` if `min > max`.
    pub fn range(min: usize, max: usize) -> Result<Arity, OptionError> {
        if min > max {
            return Err(OptionError::InvalidArity { min, max });
        }
        Ok(Arity::Range { min, max })
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Zero => write!(f, "zero"),
            Arity::ZeroOrOne => write!(f, "zero-or-one"),
            Arity::ExactlyOne => write!(f, "exactly-one"),
            Arity::ZeroOrMore => write!(f, "zero-or-more"),
            Arity::OneOrMore => write!(f, "one-or-more"),
            Arity::Range { min, max } => write!(f, "{min}..={max}"),
        }
    }
}

/// Declared value type of an option.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    String,
    Bool,
    Int,
    Float,
    /// Enum-like: one of the listed spellings, matched case-insensitively.
    Choice(Vec<String>),
    /// Comma-separated values of the inner type.
    List(Box<OptionType>),
}

impl OptionType {
    /// Look up a type by name: `string`, `bool`, `int`, `float`, `choice`
    /// or `list<...>` of any of those.
    ///
    /// `choices` supplies the allowed values for `choice`.
    pub fn from_name(name: &str, choices: &[String]) -> Option<OptionType> {
        let name = name.trim().to_lowercase();
        if let Some(inner) = name
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let inner = OptionType::from_name(inner, choices)?;
            return Some(OptionType::List(Box::new(inner)));
        }
        match name.as_str() {
            "string" | "str" => Some(OptionType::String),
            "bool" | "boolean" => Some(OptionType::Bool),
            "int" | "integer" => Some(OptionType::Int),
            "float" | "double" => Some(OptionType::Float),
            "choice" | "enum" => Some(OptionType::Choice(choices.to_vec())),
            "list" => Some(OptionType::List(Box::new(OptionType::String))),
            _ => None,
        }
    }

    /// Arity used when an option declares none.
    pub fn default_arity(&self) -> Arity {
        match self {
            OptionType::List(_) => Arity::ZeroOrMore,
            _ => Arity::ZeroOrOne,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, OptionType::Bool)
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::String => write!(f, "string"),
            OptionType::Bool => write!(f, "bool"),
            OptionType::Int => write!(f, "int"),
            OptionType::Float => write!(f, "float"),
            OptionType::Choice(choices) => write!(f, "choice[{}]", choices.join("|")),
            OptionType::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}

/// A declared option of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    long_names: Vec<LongName>,
    short_names: Vec<ShortName>,
    description: Option<String>,
    label: Option<String>,
    option_type: OptionType,
    required: bool,
    default_value: Option<String>,
    position: Option<usize>,
    arity: Arity,
}

impl CommandOption {
    /// Start building an option.
    pub fn builder() -> OptionBuilder {
        OptionBuilder::default()
    }

    pub fn long_names(&self) -> &[LongName] {
        &self.long_names
    }

    pub fn short_names(&self) -> &[ShortName] {
        &self.short_names
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn option_type(&self) -> &OptionType {
        &self.option_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Positional rank, lowest first.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Resolved arity (declared, or derived from the type).
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Identifying name as typed: `--first-long`, else `-s`.
    pub fn display_name(&self) -> String {
        match (self.long_names.first(), self.short_names.first()) {
            (Some(long), _) => long.flag(),
            (None, Some(short)) => short.flag(),
            (None, None) => String::new(),
        }
    }

    /// Identifying name without dashes: first long name, else short name.
    pub fn primary_name(&self) -> String {
        match (self.long_names.first(), self.short_names.first()) {
            (Some(long), _) => long.as_str().to_string(),
            (None, Some(short)) => short.as_char().to_string(),
            (None, None) => String::new(),
        }
    }

    /// Whether `name` (without dashes) is one of the long names.
    pub fn matches_long(&self, name: &str, case_sensitive: bool) -> bool {
        self.long_names.iter().any(|long| {
            if case_sensitive {
                long.as_str() == name
            } else {
                long.as_str().to_lowercase() == name.to_lowercase()
            }
        })
    }

    /// Whether `c` is one of the short names.
    ///
    /// Short names are single letters where `-a` and `-A` are customarily
    /// distinct, so they always match exactly.
    pub fn matches_short(&self, c: char) -> bool {
        self.short_names.iter().any(|s| s.as_char() == c)
    }

    /// Every spelling a user can type for this option.
    pub fn spellings(&self) -> Vec<String> {
        self.long_names
            .iter()
            .map(LongName::flag)
            .chain(self.short_names.iter().map(ShortName::flag))
            .collect()
    }
}

/// Builder for [`CommandOption`].
///
/// Names are validated in [`OptionBuilder::build`], so a chain of setters
/// never fails halfway.
#[derive(Debug, Clone, Default)]
pub struct OptionBuilder {
    long_names: Vec<String>,
    short_names: Vec<char>,
    description: Option<String>,
    label: Option<String>,
    option_type: Option<OptionType>,
    required: bool,
    default_value: Option<String>,
    position: Option<usize>,
    arity: Option<Arity>,
}

impl OptionBuilder {
    /// Add a long name (without `--`).
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long_names.push(name.into());
        self
    }

    /// Add a short name.
    pub fn short(mut self, name: char) -> Self {
        self.short_names.push(name);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Mark the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Positional rank, lowest first.
    pub fn position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Validate and build the option.
    ///
    /// # Errors
    ///
    /// - `OptionError::NoName` if no long or short name was given
    /// - `OptionError::InvalidName` if a name cannot be lexed as an option
    /// - `OptionError::InvalidArity` if a range has `min > max`
    /// - `OptionError::DuplicateName` if the same name was given twice
    pub fn build(self) -> Result<CommandOption, OptionError> {
        if self.long_names.is_empty() && self.short_names.is_empty() {
            return Err(OptionError::NoName);
        }

        let long_names = self
            .long_names
            .into_iter()
            .map(LongName::new)
            .collect::<Result<Vec<_>, _>>()?;
        let short_names = self
            .short_names
            .into_iter()
            .map(ShortName::new)
            .collect::<Result<Vec<_>, _>>()?;

        for (i, long) in long_names.iter().enumerate() {
            if long_names[..i].contains(long) {
                return Err(OptionError::DuplicateName(long.flag()));
            }
        }
        for (i, short) in short_names.iter().enumerate() {
            if short_names[..i].contains(short) {
                return Err(OptionError::DuplicateName(short.flag()));
            }
        }

        let option_type = self.option_type.unwrap_or_default();
        let arity = match self.arity {
            Some(Arity::Range { min, max }) => Arity::range(min, max)?,
            Some(arity) => arity,
            None => option_type.default_arity(),
        };

        Ok(CommandOption {
            long_names,
            short_names,
            description: self.description,
            label: self.label,
            option_type,
            required: self.required,
            default_value: self.default_value,
            position: self.position,
            arity,
        })
    }
}
