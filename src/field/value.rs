//! Value: the converted, typed value of a field.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NumberLocale;

/// A converted field value.
///
/// Serializes untagged, so a value dump reads `"X"`, `5` or `10.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            Self::Text(_) => None,
        }
    }

    /// Display text for an input element, using the locale's decimal separator.
    pub fn to_display(&self, locale: NumberLocale) -> String {
        match self {
            Self::Float(f) => locale.format_float(*f),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl TryFrom<Value> for String {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_f64().ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(3).as_i64(), Some(3));
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from(2.5).as_i64(), None);
        assert_eq!(Value::from("2.5").as_f64(), None);
    }

    #[test]
    fn display_respects_locale() {
        assert_eq!(Value::Float(2.5).to_display(NumberLocale::COMMA), "2,5");
        assert_eq!(Value::Float(2.5).to_display(NumberLocale::POINT), "2.5");
        assert_eq!(Value::Integer(7).to_display(NumberLocale::COMMA), "7");
        assert_eq!(Value::from("1.5").to_display(NumberLocale::COMMA), "1.5");
    }

    #[test]
    fn typed_extraction() {
        assert_eq!(String::try_from(Value::from("x")), Ok("x".to_owned()));
        assert_eq!(i64::try_from(Value::from(4)), Ok(4));
        assert_eq!(f64::try_from(Value::from(4)), Ok(4.0));
        assert_eq!(i64::try_from(Value::from(4.5)), Err(Value::Float(4.5)));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::from("X"),
            Value::from(5),
            Value::from(10.0),
        ])
        .unwrap();
        assert_eq!(json, r#"["X",5,10.0]"#);
    }
}
