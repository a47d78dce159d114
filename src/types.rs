//! Core value types shared by the hashing, tree and chain modules.

use serde::{Deserialize, Serialize};

/// Lowercase hex digest produced by a [`HashAlgorithm`](crate::hash::HashAlgorithm).
pub type Digest = String;

/// One element of the ordered input sequence of a tree
///
/// Deserializes untagged, so JSON `1` becomes `Integer`, `1.5` becomes
/// `Float`, `"x"` becomes `Text` and anything structured (including `null`)
/// becomes `Record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Record(serde_json::Value),
}

impl LeafValue {
    /// Parse a command-line style argument: JSON when it parses, text otherwise.
    pub fn parse_lenient(input: &str) -> Self {
        serde_json::from_str(input).unwrap_or_else(|_| LeafValue::Text(input.to_string()))
    }

    /// Returns the text payload if this is a `Text` leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LeafValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        LeafValue::Text(value.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        LeafValue::Text(value)
    }
}

impl From<&String> for LeafValue {
    fn from(value: &String) -> Self {
        LeafValue::Text(value.clone())
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        LeafValue::Bool(value)
    }
}

impl From<i32> for LeafValue {
    fn from(value: i32) -> Self {
        LeafValue::Integer(value.into())
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        LeafValue::Integer(value)
    }
}

impl From<u32> for LeafValue {
    fn from(value: u32) -> Self {
        LeafValue::Integer(value.into())
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        LeafValue::Float(value)
    }
}

/// Scalars map to their own variants, the same way untagged deserialization
/// routes them; arrays, objects and `null` become `Record`.
impl From<serde_json::Value> for LeafValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Bool(flag) => LeafValue::Bool(flag),
            Value::String(text) => LeafValue::Text(text),
            Value::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(integer), _) => LeafValue::Integer(integer),
                (None, Some(float)) => LeafValue::Float(float),
                (None, None) => LeafValue::Record(Value::Number(number)),
            },
            other => LeafValue::Record(other),
        }
    }
}
