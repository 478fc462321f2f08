//! FILENAME: core/engine/src/view.rs
//! Table View - The calculated result for one state snapshot.
//!
//! Holds the filtered+sorted rows (borrowed from the input), how many of
//! them the display window reveals, and the footer summary cells. Rendering
//! to strings happens on demand and only for visible rows.

use crate::column::ColumnSet;
use crate::column_types::render_cell;
use crate::record::Record;
use crate::sort::SortState;
use crate::summary::SummaryKind;
use serde::{Deserialize, Serialize};

/// One footer cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCell {
    pub column_id: String,
    /// The summary currently shown.
    pub kind: SummaryKind,
    pub value: f64,
    pub display: String,
    /// Every summary the column offers, for the footer picker.
    pub options: Vec<SummaryKind>,
}

#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub(crate) columns: &'a ColumnSet,
    pub(crate) rows: Vec<&'a Record>,
    pub(crate) visible_count: usize,
    pub(crate) source_count: usize,
    pub(crate) sort: SortState,
    pub(crate) summaries: Vec<SummaryCell>,
}

impl<'a> TableView<'a> {
    /// All filtered+sorted rows.
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    /// The revealed prefix of `rows()`.
    pub fn visible_rows(&self) -> &[&'a Record] {
        &self.rows[..self.visible_count]
    }

    /// Rows after filtering.
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Rows before filtering.
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.rows.len()
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn summaries(&self) -> &[SummaryCell] {
        &self.summaries
    }

    pub fn summary_for(&self, column_id: &str) -> Option<&SummaryCell> {
        self.summaries.iter().find(|s| s.column_id == column_id)
    }

    /// "Showing N of M entries" while rows remain hidden.
    pub fn status_text(&self) -> Option<String> {
        if self.has_more() {
            Some(format!(
                "Showing {} of {} entries",
                self.visible_count,
                self.rows.len()
            ))
        } else {
            None
        }
    }

    /// Display strings of the visible rows, one entry per column.
    pub fn render_visible(&self) -> Vec<Vec<String>> {
        self.visible_rows()
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| render_cell(column, record))
                    .collect()
            })
            .collect()
    }
}
