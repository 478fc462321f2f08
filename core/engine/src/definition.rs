//! FILENAME: core/engine/src/definition.rs
//! Table Definition - The serializable column layout.
//!
//! A `ColumnDefinition` describes a column the way a saved layout or a UI
//! bridge would: a string type tag, no accessor, no renderer. Converting to
//! `ColumnSpec` keeps unknown tags as `ColumnKind::Other`; custom columns
//! get their renderer attached by the host afterwards.

use crate::column::{ColumnKind, ColumnSet, ColumnSpec, CustomColumn};
use crate::error::DefinitionError;
use crate::summary::SummaryKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub id: String,

    pub header: String,

    /// "text", "number", "date", "custom" or any other tag.
    #[serde(rename = "type", default = "default_type_tag")]
    pub type_tag: String,

    #[serde(default)]
    pub filter: bool,

    /// Allowed footer summaries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<SummaryKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_summary: Option<SummaryKind>,
}

fn default_type_tag() -> String {
    "text".to_string()
}

impl ColumnDefinition {
    pub fn new(id: impl Into<String>, header: impl Into<String>, type_tag: impl Into<String>) -> Self {
        ColumnDefinition {
            id: id.into(),
            header: header.into(),
            type_tag: type_tag.into(),
            filter: false,
            summaries: Vec::new(),
            default_summary: None,
        }
    }

    pub fn to_spec(&self) -> ColumnSpec {
        let mut spec = ColumnSpec::new(
            self.id.clone(),
            self.header.clone(),
            ColumnKind::from_tag(&self.type_tag),
        )
        .with_summaries(&self.summaries);
        spec.filterable = self.filter;
        spec.default_summary = self.default_summary;
        spec
    }

    pub fn from_spec(spec: &ColumnSpec) -> Self {
        ColumnDefinition {
            id: spec.id.clone(),
            header: spec.header.clone(),
            type_tag: spec.kind.tag().to_string(),
            filter: spec.filterable,
            summaries: spec.summary_kinds.to_vec(),
            default_summary: spec.default_summary,
        }
    }
}

/// Build a validated column set from definitions.
pub fn column_set_from_definitions(definitions: &[ColumnDefinition]) -> Result<ColumnSet, DefinitionError> {
    ColumnSet::new(definitions.iter().map(ColumnDefinition::to_spec).collect())
}

/// Replace the behavior of a custom column in an already-built spec list.
/// Returns false when no custom column has that id.
pub fn attach_custom(specs: &mut [ColumnSpec], column_id: &str, custom: CustomColumn) -> bool {
    match specs.iter_mut().find(|s| s.id == column_id) {
        Some(spec) if spec.kind.is_custom() => {
            spec.kind = ColumnKind::Custom(custom);
            true
        }
        _ => false,
    }
}
