//! FILENAME: core/engine/src/column_types.rs
//! PURPOSE: Column type registry - format and compare behavior per type tag.
//! CONTEXT: Built-in tags are "text", "number" and "date". "custom" has no
//! built-in behavior: the column's own renderer/comparator is used, and
//! ordering falls back to generic string comparison. Unknown tags render the
//! raw value and also sort as strings. Nothing here fails.

use crate::column::{ColumnKind, ColumnSpec};
use crate::number_format::{format_date, format_number, parse_iso_date};
use crate::record::Record;
use crate::value::Value;
use std::cmp::Ordering;

/// Format and compare functions for one built-in column type.
#[derive(Clone, Copy)]
pub struct TypeDefinition {
    pub format: fn(&Value) -> String,
    pub compare: fn(&Value, &Value) -> Ordering,
}

impl std::fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TypeDefinition")
    }
}

const TEXT: TypeDefinition = TypeDefinition {
    format: format_text,
    compare: compare_text,
};

const NUMBER: TypeDefinition = TypeDefinition {
    format: format_number_value,
    compare: compare_number,
};

const DATE: TypeDefinition = TypeDefinition {
    format: format_date_value,
    compare: compare_date,
};

/// Look up the built-in behavior for a type tag.
pub fn lookup(tag: &str) -> Option<TypeDefinition> {
    match tag {
        "text" => Some(TEXT),
        "number" => Some(NUMBER),
        "date" => Some(DATE),
        _ => None,
    }
}

/// Built-in behavior for a column kind. None for custom and unknown kinds.
pub fn definition_for(kind: &ColumnKind) -> Option<TypeDefinition> {
    match kind {
        ColumnKind::Text => Some(TEXT),
        ColumnKind::Number => Some(NUMBER),
        ColumnKind::Date => Some(DATE),
        ColumnKind::Custom(_) | ColumnKind::Other(_) => None,
    }
}

// ============================================================================
// COLUMN-LEVEL ENTRY POINTS
// ============================================================================

/// Display string for a value of the given column.
/// Custom columns without a renderer and unknown types show the raw value.
pub fn format_value(column: &ColumnSpec, value: &Value) -> String {
    match definition_for(&column.kind) {
        Some(definition) => (definition.format)(value),
        None => value.display_value(),
    }
}

/// Display string for a record's cell in the given column. Custom columns
/// render through their own renderer and receive the full record.
pub fn render_cell(column: &ColumnSpec, record: &Record) -> String {
    if let ColumnKind::Custom(custom) = &column.kind {
        if let Some(renderer) = &custom.renderer {
            return renderer.format(record);
        }
    }
    format_value(column, &column.resolve(record))
}

/// Order two resolved values of the given column.
pub fn compare_values(column: &ColumnSpec, a: &Value, b: &Value) -> Ordering {
    match &column.kind {
        ColumnKind::Custom(custom) => match &custom.comparator {
            Some(comparator) => comparator.compare(a, b),
            None => compare_generic(a, b),
        },
        kind => match definition_for(kind) {
            Some(definition) => (definition.compare)(a, b),
            None => compare_generic(a, b),
        },
    }
}

/// Generic string comparison of the values' plain string forms.
pub fn compare_generic(a: &Value, b: &Value) -> Ordering {
    collate(&a.display_value(), &b.display_value())
}

// ============================================================================
// TEXT
// ============================================================================

fn format_text(value: &Value) -> String {
    value.display_value()
}

fn compare_text(a: &Value, b: &Value) -> Ordering {
    compare_generic(a, b)
}

/// Lexical ordering that ignores case first, then puts lowercase before
/// uppercase when two strings differ only in case.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| {
        a.chars()
            .zip(b.chars())
            .map(|(ca, cb)| match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

// ============================================================================
// NUMBER
// ============================================================================

/// Missing cells render blank; a genuine zero renders "0.00". Text that does
/// not read as a number is shown as-is.
fn format_number_value(value: &Value) -> String {
    if value.is_blank() {
        return String::new();
    }
    match value.parse_number() {
        Some(n) => format_number(n),
        None => value.display_value(),
    }
}

fn compare_number(a: &Value, b: &Value) -> Ordering {
    a.to_number()
        .partial_cmp(&b.to_number())
        .unwrap_or(Ordering::Equal)
}

// ============================================================================
// DATE
// ============================================================================

fn format_date_value(value: &Value) -> String {
    match value {
        Value::Text(s) => format_date(s).unwrap_or_else(|| s.clone()),
        other => other.display_value(),
    }
}

/// Chronological order. Values that do not parse as dates sort before all
/// valid dates and among themselves as strings.
fn compare_date(a: &Value, b: &Value) -> Ordering {
    let parse = |v: &Value| match v {
        Value::Text(s) => parse_iso_date(s),
        _ => None,
    };
    match (parse(a), parse(b)) {
        (Some(da), Some(db)) => da.cmp(&db),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => compare_generic(a, b),
    }
}
