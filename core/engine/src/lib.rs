//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the table engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! The engine is UI-agnostic: it takes records, a column list and a state
//! snapshot, and returns the rows to show plus their footer summaries.

pub mod column;
pub mod column_types;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod number_format;
pub mod record;
pub mod sort;
pub mod state;
pub mod summary;
pub mod value;
pub mod view;
pub mod window;


// Re-export commonly used types at the crate root
pub use column::{
    ColumnKind, ColumnSet, ColumnSpec, Comparable, CustomColumn, Formattable, ValueAccessor,
    ACTIONS_COLUMN_ID,
};
pub use column_types::{compare_values, format_value, render_cell, TypeDefinition};
pub use definition::{attach_custom, column_set_from_definitions, ColumnDefinition};
pub use engine::{calculate_table, TableEngine};
pub use error::{DefinitionError, StateError};
pub use filter::{filter_records, ComparisonOp, FilterState, NumericCriterion};
pub use number_format::{format_date, format_number, parse_iso_date};
pub use record::Record;
pub use sort::{sort_records, SortDirection, SortState};
pub use state::TableState;
pub use summary::{aggregate, format_summary, SummaryKind, SummarySelection};
pub use value::Value;
pub use view::{SummaryCell, TableView};
pub use window::{DisplayWindow, ScrollMetrics, WindowConfig};
