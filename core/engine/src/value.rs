//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the scalar value held by a single record field.
//! CONTEXT: Records carry strings, numbers or ISO-8601 date strings. Missing
//! fields and JSON nulls are represented as `Value::Empty`. Numeric coercion
//! here is the single place that decides how "not a number" becomes 0.

use serde::{Deserialize, Serialize};

/// The scalar content of one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Number(_) => false,
            Value::Text(s) => s.trim().is_empty(),
        }
    }

    /// Strict numeric parse. Returns None when the value has no numeric reading.
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            Value::Empty => None,
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_numeric_text(s),
        }
    }

    /// Numeric value with every non-numeric or missing value coerced to 0.
    pub fn to_number(&self) -> f64 {
        self.parse_number().unwrap_or(0.0)
    }

    /// The plain string form of the value, used for substring filtering and
    /// generic string comparison.
    pub fn display_value(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            Value::Text(s) => s.clone(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Parse a text field as a finite decimal number. Blank text reads as 0, which
/// is how the source data treats empty numeric cells.
pub(crate) fn parse_numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // Rust accepts "inf" and "NaN"; those are not numbers in the source data.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
