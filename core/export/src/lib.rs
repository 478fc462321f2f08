//! FILENAME: core/export/src/lib.rs
//! Report Export Module
//!
//! Turns engine rows into a one-sheet XLSX report: a merged title row, a
//! header row, then one row per record. Custom columns and the actions column
//! never leave the table.

mod error;
mod xlsx_writer;

pub use error::ExportError;
pub use xlsx_writer::{report_file_name, save_report, save_report_dated, write_report};

use engine::{ColumnSet, Record};
use serde::{Deserialize, Serialize};

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

/// Name of the single worksheet in every report.
pub const REPORT_SHEET_NAME: &str = "Report";

/// Narrowest column, in Excel character units.
pub const MIN_COLUMN_WIDTH: usize = 15;

/// Column width hint: the header length, but at least `MIN_COLUMN_WIDTH`.
pub fn column_width(header: &str) -> f64 {
    header.chars().count().max(MIN_COLUMN_WIDTH) as f64
}

// ============================================================================
// REPORT SHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportColumn {
    pub header: String,
    /// Number-typed source column: parseable values become numeric cells.
    pub numeric: bool,
}

impl ExportColumn {
    pub fn width(&self) -> f64 {
        column_width(&self.header)
    }
}

/// One exported row, keyed by column header in column order.
pub type ExportRow = Record;

/// Everything the writer needs, detached from the engine's column list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSheet {
    pub title: String,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<ExportRow>,
}

impl ExportSheet {
    /// Map records onto the exportable columns. Values go through each
    /// column's accessor, so derived columns export their derived value.
    pub fn from_records(
        title: impl Into<String>,
        records: &[&Record],
        columns: &ColumnSet,
    ) -> Result<Self, ExportError> {
        let exportable: Vec<_> = columns.exportable().collect();
        if exportable.is_empty() {
            return Err(ExportError::NoExportableColumns);
        }

        let rows: Vec<ExportRow> = records
            .iter()
            .map(|record| {
                exportable
                    .iter()
                    .map(|column| (column.header.clone(), column.resolve(record).into_owned()))
                    .collect()
            })
            .collect();

        Ok(ExportSheet {
            title: title.into(),
            columns: exportable
                .iter()
                .map(|column| ExportColumn {
                    header: column.header.clone(),
                    numeric: column.kind.is_numeric(),
                })
                .collect(),
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
