//! FILENAME: core/engine/src/engine.rs
//! Table Engine - turns records plus a state snapshot into a `TableView`.
//!
//! Algorithm:
//! 1. Filter: keep records passing every active column filter
//! 2. Sort: order by the active sort column (stable), or keep input order
//! 3. Window: reveal the first `min(window, rows)` rows
//! 4. Summaries: aggregate each summarizable column over ALL rows from step 2

use crate::column::{ColumnSet, ColumnSpec};
use crate::filter::{filter_records, FilterState};
use crate::record::Record;
use crate::sort::{sort_records, SortDirection, SortState};
use crate::state::TableState;
use crate::summary::{aggregate, format_summary, SummaryKind, SummarySelection};
use crate::view::{SummaryCell, TableView};

/// The table engine for one column list. Stateless between calls.
#[derive(Debug, Clone)]
pub struct TableEngine {
    columns: ColumnSet,
}

impl TableEngine {
    pub fn new(columns: ColumnSet) -> Self {
        TableEngine { columns }
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn filter<'a>(&self, records: &'a [Record], filters: &FilterState) -> Vec<&'a Record> {
        filter_records(records, &self.columns, filters)
    }

    /// Sort rows by a column id. An id outside the column list is a caller
    /// error: it asserts in debug builds and leaves the order unchanged.
    pub fn sort<'a>(
        &self,
        rows: &[&'a Record],
        column_id: Option<&str>,
        direction: SortDirection,
    ) -> Vec<&'a Record> {
        let column = column_id.and_then(|id| self.lookup(id));
        sort_records(rows, column, direction)
    }

    /// Aggregate a column over rows. Unknown ids assert in debug builds and yield 0.
    pub fn aggregate(&self, rows: &[&Record], column_id: &str, kind: SummaryKind) -> f64 {
        self.lookup(column_id)
            .map(|column| aggregate(rows, column, kind))
            .unwrap_or(0.0)
    }

    /// Filter and sort: the row set every summary is computed over.
    pub fn filtered_sorted<'a>(
        &self,
        records: &'a [Record],
        filters: &FilterState,
        sort: &SortState,
    ) -> Vec<&'a Record> {
        let filtered = self.filter(records, filters);
        self.sort(&filtered, sort.column_id.as_deref(), sort.direction)
    }

    /// Footer cells for every summarizable column.
    pub fn summaries(&self, rows: &[&Record], selection: &SummarySelection) -> Vec<SummaryCell> {
        self.columns
            .summarizable()
            .filter_map(|column| {
                let kind = selection.effective_kind(column)?;
                let value = aggregate(rows, column, kind);
                Some(SummaryCell {
                    column_id: column.id.clone(),
                    kind,
                    value,
                    display: format_summary(value, kind),
                    options: column.summary_kinds.to_vec(),
                })
            })
            .collect()
    }

    /// Run the whole pipeline for one state snapshot.
    pub fn calculate<'a>(&'a self, records: &'a [Record], state: &TableState) -> TableView<'a> {
        let rows = self.filtered_sorted(records, &state.filters, &state.sort);
        let summaries = self.summaries(&rows, &state.summaries);
        let visible_count = state.window.visible_len(rows.len());

        TableView {
            columns: &self.columns,
            visible_count,
            source_count: records.len(),
            sort: state.sort.clone(),
            summaries,
            rows,
        }
    }

    fn lookup(&self, column_id: &str) -> Option<&ColumnSpec> {
        let column = self.columns.get(column_id);
        debug_assert!(column.is_some(), "unknown column {}", column_id);
        column
    }
}

/// Convenience wrapper for one-off calculations.
pub fn calculate_table<'a>(
    engine: &'a TableEngine,
    records: &'a [Record],
    state: &TableState,
) -> TableView<'a> {
    engine.calculate(records, state)
}
