//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Per-column filter evaluation.
//! CONTEXT: Each column may carry one raw filter string. Text-like columns
//! match by case-insensitive substring. Number columns understand a leading
//! comparison operator (`>50`, `<1000`, `=0`). Ambiguous filters never hide
//! rows. A row survives only if it satisfies every active column filter.

use crate::column::{ColumnSet, ColumnSpec};
use crate::record::Record;
use crate::value::{parse_numeric_text, Value};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER STATE
// ============================================================================

/// Raw filter text per column id. Empty text means "no filter" and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    filters: FxHashMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the filter of a column. Returns true when the stored
    /// filter actually changed.
    pub fn set(&mut self, column_id: impl Into<String>, text: impl Into<String>) -> bool {
        let column_id = column_id.into();
        let text = text.into();
        if text.is_empty() {
            return self.filters.remove(&column_id).is_some();
        }
        match self.filters.get(&column_id) {
            Some(existing) if *existing == text => false,
            _ => {
                self.filters.insert(column_id, text);
                true
            }
        }
    }

    pub fn get(&self, column_id: &str) -> Option<&str> {
        self.filters.get(column_id).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// NUMERIC CRITERION
// ============================================================================

/// Comparison operators accepted at the start of a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    GreaterThan,
    LessThan,
    Equal,
}

impl ComparisonOp {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(ComparisonOp::GreaterThan),
            '<' => Some(ComparisonOp::LessThan),
            '=' => Some(ComparisonOp::Equal),
            _ => None,
        }
    }

    fn apply(&self, value: f64, operand: f64) -> bool {
        match self {
            ComparisonOp::GreaterThan => value > operand,
            ComparisonOp::LessThan => value < operand,
            ComparisonOp::Equal => value == operand,
        }
    }
}

/// Parsed form of a number column filter.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericCriterion {
    /// Operator plus operand, e.g. `>50`.
    Compare(ComparisonOp, f64),
    /// A plain numeric literal, matched as a substring of the raw value.
    Contains(String),
    /// Anything else. Never hides a row.
    MatchAll,
}

impl NumericCriterion {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut chars = text.chars();
        if let Some(op) = chars.next().and_then(ComparisonOp::from_char) {
            let operand = chars.as_str().trim();
            // A bare operator (still being typed) has no operand yet.
            if operand.is_empty() {
                return NumericCriterion::MatchAll;
            }
            return match parse_numeric_text(operand) {
                Some(n) => NumericCriterion::Compare(op, n),
                None => NumericCriterion::MatchAll,
            };
        }
        match parse_numeric_text(text) {
            Some(_) => NumericCriterion::Contains(text.to_string()),
            None => NumericCriterion::MatchAll,
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            NumericCriterion::Compare(op, operand) => op.apply(value.to_number(), *operand),
            NumericCriterion::Contains(needle) => value.display_value().contains(needle.as_str()),
            NumericCriterion::MatchAll => true,
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Check if a record passes one column's filter text.
pub fn matches(record: &Record, column: &ColumnSpec, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }

    let value = column.resolve(record);

    if column.kind.is_numeric() {
        return NumericCriterion::parse(filter_text).matches(&value);
    }

    value
        .display_value()
        .to_lowercase()
        .contains(&filter_text.to_lowercase())
}

/// Check a record against every active filter (logical AND).
/// Filters naming a column outside the column set are a caller error; they
/// assert in debug builds and are skipped otherwise.
pub fn record_passes(record: &Record, columns: &ColumnSet, filters: &FilterState) -> bool {
    filters.iter().all(|(column_id, text)| match columns.get(column_id) {
        Some(column) => matches(record, column, text),
        None => {
            debug_assert!(false, "filter references unknown column {}", column_id);
            true
        }
    })
}

/// Keep the records that pass every active filter, in input order.
pub fn filter_records<'a>(
    records: &'a [Record],
    columns: &ColumnSet,
    filters: &FilterState,
) -> Vec<&'a Record> {
    if filters.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| record_passes(record, columns, filters))
        .collect()
}
