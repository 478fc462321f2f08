//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for frontend communication.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use engine::{ColumnSpec, SortDirection, SortState, SummaryCell, TableView};
use serde::{Deserialize, Serialize};

/// One column header with its current filter and sort markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderData {
    pub id: String,
    pub header: String,
    pub column_type: String,
    pub filterable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
    /// Set only on the active sort column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// "↑" or "↓" on the active sort column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_indicator: Option<String>,
}

impl HeaderData {
    pub fn new(column: &ColumnSpec, filter_text: Option<&str>, sort: &SortState) -> Self {
        let direction = (sort.column_id.as_deref() == Some(column.id.as_str())).then_some(sort.direction);
        HeaderData {
            id: column.id.clone(),
            header: column.header.clone(),
            column_type: column.kind.tag().to_string(),
            filterable: column.filterable,
            filter_text: filter_text.map(str::to_string),
            sort_direction: direction,
            sort_indicator: direction.map(|d| d.indicator().to_string()),
        }
    }
}

/// Everything the table component needs for one render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewData {
    pub title: String,
    pub headers: Vec<HeaderData>,
    /// Display strings of the visible rows only.
    pub rows: Vec<Vec<String>>,
    pub visible_count: usize,
    pub total_count: usize,
    pub source_count: usize,
    pub has_more: bool,
    /// "Showing N of M entries" while rows remain hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub summaries: Vec<SummaryCell>,
}

impl TableViewData {
    pub fn from_view(title: &str, headers: Vec<HeaderData>, view: &TableView) -> Self {
        TableViewData {
            title: title.to_string(),
            headers,
            rows: view.render_visible(),
            visible_count: view.visible_count(),
            total_count: view.total_count(),
            source_count: view.source_count(),
            has_more: view.has_more(),
            status: view.status_text(),
            summaries: view.summaries().to_vec(),
        }
    }
}

/// Result of a saved export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
}
