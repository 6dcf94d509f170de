//! Loosely-typed command arguments.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value as delivered by the program runner.
///
/// Block and text programs hand the dispatcher untyped arguments; the
/// dispatcher resolves them against each operation's parameter shape and
/// reports mismatches by [`type_name`](Value::type_name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Word(String),
    Color(Color),
}

impl Value {
    /// Type name used in diagnostics: `"number"`, `"word"`, `"color"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Word(_) => "word",
            Self::Color(_) => "color",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(w: &str) -> Self {
        Self::Word(w.to_string())
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Word(w) => write!(f, "{w}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::from("left").type_name(), "word");
        assert_eq!(Value::from(Color::BLACK).type_name(), "color");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("up").as_word(), Some("up"));
        assert_eq!(Value::from("up").as_number(), None);
    }

    #[test]
    fn test_json_round_trip() {
        let values = vec![
            Value::Number(-7.5),
            Value::from("right"),
            Value::from(Color::new(255, 0, 0)),
        ];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
