//! parser::convert
//!
//! String to typed value conversion for option values.
//!
//! # Rules
//!
//! - `bool`: `true`/`on`/`yes`/`1` and `false`/`off`/`no`/`0`, any case
//! - `int`: signed 64-bit decimal
//! - `float`: anything `f64::from_str` accepts
//! - `choice`: case-insensitive match, yields the declared spelling
//! - `list<T>`: split on `,`, each element converted as `T`

use serde::Serialize;
use thiserror::Error;

use crate::core::option::OptionType;

/// A failed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to convert '{value}' to {target}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub target: String,
    pub reason: String,
}

/// A converted option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::String(s) => write!(f, "{s}"),
            OptionValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// Parse a boolean spelling.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Convert `raw` to `target`.
///
/// # Errors
///
/// Returns a `ConversionError` naming the value, target type and reason.
pub fn convert(raw: &str, target: &OptionType) -> Result<OptionValue, ConversionError> {
    let fail = |reason: String| ConversionError {
        value: raw.to_string(),
        target: target.to_string(),
        reason,
    };

    match target {
        OptionType::String => Ok(OptionValue::String(raw.to_string())),
        OptionType::Bool => parse_bool(raw)
            .map(OptionValue::Bool)
            .ok_or_else(|| fail("not a boolean".into())),
        OptionType::Int => raw
            .trim()
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|e| fail(e.to_string())),
        OptionType::Float => raw
            .trim()
            .parse::<f64>()
            .map(OptionValue::Float)
            .map_err(|e| fail(e.to_string())),
        OptionType::Choice(choices) => choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(raw))
            .map(|c| OptionValue::String(c.clone()))
            .ok_or_else(|| fail(format!("expected one of {}", choices.join(", ")))),
        OptionType::List(inner) => {
            if raw.is_empty() {
                return Ok(OptionValue::List(Vec::new()));
            }
            raw.split(',')
                .map(|item| convert(item, inner))
                .collect::<Result<Vec<_>, _>>()
                .map(OptionValue::List)
                .map_err(|e| fail(e.reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_spellings() {
        for raw in ["true", "ON", "Yes", "1"] {
            assert_eq!(convert(raw, &OptionType::Bool), Ok(OptionValue::Bool(true)));
        }
        for raw in ["false", "off", "NO", "0"] {
            assert_eq!(convert(raw, &OptionType::Bool), Ok(OptionValue::Bool(false)));
        }
        assert!(convert("maybe", &OptionType::Bool).is_err());
    }

    #[test]
    fn int_and_float() {
        assert_eq!(convert("-12", &OptionType::Int), Ok(OptionValue::Int(-12)));
        assert_eq!(convert("1.5", &OptionType::Float), Ok(OptionValue::Float(1.5)));
        assert!(convert("1.5", &OptionType::Int).is_err());
    }

    #[test]
    fn failure_reason_names_value_and_type() {
        let error = convert("abc", &OptionType::Int).unwrap_err();
        let text = error.to_string();
        assert!(text.starts_with("Failed to convert 'abc' to int"), "{text}");
    }

    #[test]
    fn choice_returns_declared_spelling() {
        let target = OptionType::Choice(vec!["Red".into(), "Blue".into()]);
        assert_eq!(
            convert("red", &target),
            Ok(OptionValue::String("Red".into()))
        );
        assert!(convert("green", &target).is_err());
    }

    #[test]
    fn list_converts_each_element() {
        let target = OptionType::List(Box::new(OptionType::Int));
        assert_eq!(
            convert("1,2,3", &target),
            Ok(OptionValue::List(vec![
                OptionValue::Int(1),
                OptionValue::Int(2),
                OptionValue::Int(3)
            ]))
        );

        let error = convert("1,x", &target).unwrap_err();
        assert_eq!(error.value, "1,x");
        assert_eq!(error.target, "list<int>");
    }

    #[test]
    fn string_list_display() {
        let value = convert("v1,v2", &OptionType::List(Box::new(OptionType::String))).unwrap();
        assert_eq!(value.to_string(), "[v1, v2]");
        assert_eq!(value.as_list().map(<[_]>::len), Some(2));
    }
}
