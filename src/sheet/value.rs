//! Cell values.
//!
//! A cell holds one [`Value`]: a closed variant over the kinds of data a
//! sheet can carry. `Empty` doubles as the "never written" state, so reads
//! never need an `Option` wrapper and downstream serialization can match
//! exhaustively.

use serde::{Deserialize, Serialize};

/// Shared empty cell returned for reads outside any live window.
pub(crate) static EMPTY: Value = Value::Empty;

/// The value stored in one cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl Value {
    /// True only for `Empty`. An empty `Text` string is not an empty cell.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Float(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Value {
        Value::Bytes(bytes)
    }
}

/// Format a number for a delimited field.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl std::fmt::Display for Value {
    /// One formatting rule per variant; `Empty` renders as the empty string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => f.write_str(&format_number(*n)),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}
