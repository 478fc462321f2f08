//! FILENAME: core/engine/src/summary.rs
//! PURPOSE: Footer summaries: reduce a column to sum/avg/count/min/max.
//! CONTEXT: Aggregation always runs over the full filtered+sorted row set,
//! never over the display window. Every summary of an empty set is 0.

use crate::column::ColumnSpec;
use crate::number_format::format_number;
use crate::record::Record;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SUMMARY KIND
// ============================================================================

/// Supported footer summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 5] = [
        SummaryKind::Sum,
        SummaryKind::Avg,
        SummaryKind::Count,
        SummaryKind::Min,
        SummaryKind::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Sum => "sum",
            SummaryKind::Avg => "avg",
            SummaryKind::Count => "count",
            SummaryKind::Min => "min",
            SummaryKind::Max => "max",
        }
    }

    pub fn parse(s: &str) -> Option<SummaryKind> {
        SummaryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Default for SummaryKind {
    fn default() -> Self {
        SummaryKind::Sum
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Reduce a column over the given rows. Non-numeric values count as 0;
/// `count` counts every row regardless of its value.
pub fn aggregate(rows: &[&Record], column: &ColumnSpec, kind: SummaryKind) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }

    if kind == SummaryKind::Count {
        return rows.len() as f64;
    }

    let values = rows.iter().map(|record| column.resolve(record).to_number());

    match kind {
        SummaryKind::Sum => values.sum(),
        SummaryKind::Avg => values.sum::<f64>() / rows.len() as f64,
        SummaryKind::Min => values.fold(f64::INFINITY, f64::min),
        SummaryKind::Max => values.fold(f64::NEG_INFINITY, f64::max),
        SummaryKind::Count => unreachable!("handled above"),
    }
}

/// Display form of a summary value: counts as integers, everything else with
/// the number column format.
pub fn format_summary(value: f64, kind: SummaryKind) -> String {
    match kind {
        SummaryKind::Count => format!("{:.0}", value),
        _ => format_number(value),
    }
}

// ============================================================================
// SUMMARY SELECTION
// ============================================================================

/// The summary the user picked per column. Columns without an entry fall back
/// to their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySelection {
    selected: FxHashMap<String, SummaryKind>,
}

impl SummarySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, column_id: impl Into<String>, kind: SummaryKind) {
        self.selected.insert(column_id.into(), kind);
    }

    pub fn selected(&self, column_id: &str) -> Option<SummaryKind> {
        self.selected.get(column_id).copied()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The summary to show for a column: the user's pick, the column default,
    /// its only allowed kind, `sum`, or the first allowed kind, in that order.
    /// None for columns that offer no summary.
    pub fn effective_kind(&self, column: &ColumnSpec) -> Option<SummaryKind> {
        if !column.is_summarizable() {
            return None;
        }
        if let Some(kind) = self.selected(&column.id).filter(|k| column.allows_summary(*k)) {
            return Some(kind);
        }
        if let Some(kind) = column.default_summary {
            return Some(kind);
        }
        if column.summary_kinds.len() == 1 {
            return Some(column.summary_kinds[0]);
        }
        if column.allows_summary(SummaryKind::Sum) {
            return Some(SummaryKind::Sum);
        }
        column.summary_kinds.first().copied()
    }
}
