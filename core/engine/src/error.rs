//! FILENAME: core/engine/src/error.rs

use crate::summary::SummaryKind;
use thiserror::Error;

/// An invalid column list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),

    #[error("Default summary {kind} is not allowed for column {column}")]
    DefaultSummaryNotAllowed { column: String, kind: SummaryKind },
}

/// A state transition that names something the column list does not have.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Summary {kind} is not available for column {column}")]
    SummaryNotAllowed { column: String, kind: SummaryKind },
}
