use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Placeholder name to replacement value, passed per translation call.
pub type Replacements = HashMap<String, Value>;

/// A value substituted into a translation placeholder.
///
/// Any value is accepted; it is rendered through `Display` at substitution
/// time. Numbers render in plain decimal.
///
/// # Example
///
/// ```
/// use glossa::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.to_string(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            Value::String(_) => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line style argument, preferring integers, then floats.
    pub fn parse_lossy(raw: &str) -> Value {
        if let Ok(n) = raw.parse::<i64>() {
            Value::Number(n)
        } else if let Ok(f) = raw.parse::<f64>() {
            Value::Float(f)
        } else {
            Value::String(raw.to_string())
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

/// Values beyond `i64::MAX` keep their decimal rendering as strings.
impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Number)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}
