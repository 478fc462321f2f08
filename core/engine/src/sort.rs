//! FILENAME: core/engine/src/sort.rs
//! PURPOSE: Single-key stable sorting of table rows.
//! CONTEXT: Values are resolved once per row, then compared with the
//! column type's comparator. Equal keys keep their input order.

use crate::column::ColumnSpec;
use crate::column_types::compare_values;
use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header arrow shown next to the active sort column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// The active sort key. At most one column sorts at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(column_id: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            column_id: Some(column_id.into()),
            direction,
        }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes the active one, ascending.
    pub fn toggle(&mut self, column_id: &str) {
        if self.column_id.as_deref() == Some(column_id) {
            self.direction = self.direction.toggled();
        } else {
            self.column_id = Some(column_id.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn clear(&mut self) {
        *self = SortState::default();
    }

    pub fn is_active(&self) -> bool {
        self.column_id.is_some()
    }
}

/// Return the rows ordered by the column. No column means input order.
pub fn sort_records<'a>(
    rows: &[&'a Record],
    column: Option<&ColumnSpec>,
    direction: SortDirection,
) -> Vec<&'a Record> {
    let column = match column {
        Some(column) => column,
        None => return rows.to_vec(),
    };

    let mut keyed: Vec<_> = rows
        .iter()
        .map(|&record| (column.resolve(record).into_owned(), record))
        .collect();

    // slice::sort_by is stable.
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(column, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}
