//! FILENAME: core/engine/src/state.rs
//! PURPOSE: The per-view table state and its transitions.
//! CONTEXT: Bundles filter, sort, summary selection and display window into
//! one snapshot the calculation reads. Transitions validate column ids
//! against the column list and keep the window rule: any change to the
//! filtered set resets the window to its initial size.

use crate::column::ColumnSet;
use crate::error::StateError;
use crate::filter::FilterState;
use crate::sort::{SortDirection, SortState};
use crate::summary::{SummaryKind, SummarySelection};
use crate::window::{DisplayWindow, ScrollMetrics, WindowConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub filters: FilterState,
    pub sort: SortState,
    pub summaries: SummarySelection,
    pub window: DisplayWindow,
}

impl TableState {
    pub fn new(window: WindowConfig) -> Self {
        TableState {
            filters: FilterState::new(),
            sort: SortState::new(),
            summaries: SummarySelection::new(),
            window: DisplayWindow::new(window),
        }
    }

    fn require_column(columns: &ColumnSet, column_id: &str) -> Result<(), StateError> {
        if columns.contains(column_id) {
            Ok(())
        } else {
            Err(StateError::UnknownColumn(column_id.to_string()))
        }
    }

    /// Edit a column filter. The window resets when the filter changed.
    /// Returns whether it changed.
    pub fn set_filter(
        &mut self,
        columns: &ColumnSet,
        column_id: &str,
        text: &str,
    ) -> Result<bool, StateError> {
        Self::require_column(columns, column_id)?;
        let changed = self.filters.set(column_id, text);
        if changed {
            self.window.reset();
        }
        Ok(changed)
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.window.reset();
        }
    }

    /// Header click on a column.
    pub fn toggle_sort(&mut self, columns: &ColumnSet, column_id: &str) -> Result<(), StateError> {
        Self::require_column(columns, column_id)?;
        self.sort.toggle(column_id);
        Ok(())
    }

    pub fn set_sort(
        &mut self,
        columns: &ColumnSet,
        column_id: &str,
        direction: SortDirection,
    ) -> Result<(), StateError> {
        Self::require_column(columns, column_id)?;
        self.sort = SortState::by(column_id, direction);
        Ok(())
    }

    /// Pick the footer summary of a column.
    pub fn select_summary(
        &mut self,
        columns: &ColumnSet,
        column_id: &str,
        kind: SummaryKind,
    ) -> Result<(), StateError> {
        let column = columns
            .get(column_id)
            .ok_or_else(|| StateError::UnknownColumn(column_id.to_string()))?;
        if !column.allows_summary(kind) {
            return Err(StateError::SummaryNotAllowed {
                column: column_id.to_string(),
                kind,
            });
        }
        self.summaries.select(column_id, kind);
        Ok(())
    }

    pub fn grow_window(&mut self, total: usize) -> bool {
        self.window.grow(total)
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics, total: usize) -> bool {
        self.window.on_scroll(metrics, total)
    }

    /// A new record set replaces the old one: filters, sort, summary picks
    /// and the window all return to their defaults.
    pub fn records_replaced(&mut self) {
        *self = TableState::new(*self.window.config());
    }
}
