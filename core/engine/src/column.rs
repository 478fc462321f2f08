//! FILENAME: core/engine/src/column.rs
//! PURPOSE: Column specifications and the validated column list of a table.
//! CONTEXT: A column is identified by a unique id, carries a type tag that
//! drives formatting/comparison/filtering, and optionally declares which
//! summaries its footer offers. Derived columns resolve their value through
//! an accessor instead of a direct field lookup. Custom columns bring their
//! own renderer (and optionally comparator) through capability traits.

use crate::error::DefinitionError;
use crate::record::Record;
use crate::summary::SummaryKind;
use crate::value::Value;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Column id reserved for row action buttons.
pub const ACTIONS_COLUMN_ID: &str = "actions";

// ============================================================================
// CAPABILITIES FOR CUSTOM COLUMNS
// ============================================================================

/// Renders a custom column cell from the full record.
pub trait Formattable: Send + Sync {
    fn format(&self, record: &Record) -> String;
}

/// Orders two resolved values of a custom column.
pub trait Comparable: Send + Sync {
    fn compare(&self, a: &Value, b: &Value) -> Ordering;
}

impl<F> Formattable for F
where
    F: Fn(&Record) -> String + Send + Sync,
{
    fn format(&self, record: &Record) -> String {
        self(record)
    }
}

impl<F> Comparable for F
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self(a, b)
    }
}

/// Caller-supplied behavior of a custom column. The engine never looks inside.
#[derive(Clone, Default)]
pub struct CustomColumn {
    pub renderer: Option<Arc<dyn Formattable>>,
    pub comparator: Option<Arc<dyn Comparable>>,
}

impl CustomColumn {
    pub fn new(renderer: impl Formattable + 'static) -> Self {
        CustomColumn {
            renderer: Some(Arc::new(renderer)),
            comparator: None,
        }
    }

    pub fn with_comparator(mut self, comparator: impl Comparable + 'static) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }
}

impl fmt::Debug for CustomColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomColumn")
            .field("renderer", &self.renderer.is_some())
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

// ============================================================================
// COLUMN KIND
// ============================================================================

/// The type of a column.
#[derive(Debug, Clone)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    Custom(CustomColumn),
    /// A type tag the registry does not know. Rendered raw, sorted as strings.
    Other(String),
}

impl ColumnKind {
    /// Maps a type tag to a kind. "custom" yields a custom column with no renderer.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => ColumnKind::Text,
            "number" => ColumnKind::Number,
            "date" => ColumnKind::Date,
            "custom" => ColumnKind::Custom(CustomColumn::default()),
            other => ColumnKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
            ColumnKind::Custom(_) => "custom",
            ColumnKind::Other(tag) => tag,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Number)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ColumnKind::Custom(_))
    }
}

// ============================================================================
// COLUMN SPEC
// ============================================================================

/// Pure function deriving a column value from the whole record.
pub type ValueAccessor = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Declarative description of one column.
#[derive(Clone)]
pub struct ColumnSpec {
    /// Unique id within the table; also the record field name unless an accessor is set.
    pub id: String,
    /// Display label.
    pub header: String,
    pub kind: ColumnKind,
    /// Whether the UI offers a filter box for this column.
    pub filterable: bool,
    /// Summaries offered in the footer. Empty when the column is not summarizable.
    pub summary_kinds: SmallVec<[SummaryKind; 5]>,
    pub default_summary: Option<SummaryKind>,
    pub accessor: Option<ValueAccessor>,
}

impl ColumnSpec {
    pub fn new(id: impl Into<String>, header: impl Into<String>, kind: ColumnKind) -> Self {
        ColumnSpec {
            id: id.into(),
            header: header.into(),
            kind,
            filterable: false,
            summary_kinds: SmallVec::new(),
            default_summary: None,
            accessor: None,
        }
    }

    pub fn text(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(id, header, ColumnKind::Text)
    }

    pub fn number(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(id, header, ColumnKind::Number)
    }

    pub fn date(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(id, header, ColumnKind::Date)
    }

    pub fn custom(id: impl Into<String>, header: impl Into<String>, custom: CustomColumn) -> Self {
        Self::new(id, header, ColumnKind::Custom(custom))
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets the allowed summaries, dropping duplicates.
    pub fn with_summaries(mut self, kinds: &[SummaryKind]) -> Self {
        self.summary_kinds.clear();
        for kind in kinds {
            if !self.summary_kinds.contains(kind) {
                self.summary_kinds.push(*kind);
            }
        }
        self
    }

    pub fn with_default_summary(mut self, kind: SummaryKind) -> Self {
        self.default_summary = Some(kind);
        self
    }

    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// The column's value for a record: the accessor when present, else the
    /// field with the column's id.
    pub fn resolve<'r>(&self, record: &'r Record) -> Cow<'r, Value> {
        match &self.accessor {
            Some(accessor) => Cow::Owned(accessor(record)),
            None => Cow::Borrowed(record.get(&self.id)),
        }
    }

    pub fn is_summarizable(&self) -> bool {
        !self.summary_kinds.is_empty()
    }

    pub fn allows_summary(&self, kind: SummaryKind) -> bool {
        self.summary_kinds.contains(&kind)
    }

    /// Custom columns and the actions column never leave the table view.
    pub fn is_exportable(&self) -> bool {
        !self.kind.is_custom() && self.id != ACTIONS_COLUMN_ID
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("kind", &self.kind)
            .field("filterable", &self.filterable)
            .field("summary_kinds", &self.summary_kinds)
            .field("default_summary", &self.default_summary)
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

// ============================================================================
// COLUMN SET
// ============================================================================

/// The ordered, validated column list of one table.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnSpec>,
    index: FxHashMap<String, usize>,
}

impl ColumnSet {
    /// Validates ids are unique and every default summary is allowed.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, DefinitionError> {
        let mut index = FxHashMap::default();
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.id.clone(), position).is_some() {
                return Err(DefinitionError::DuplicateColumnId(column.id.clone()));
            }
            if let Some(kind) = column.default_summary {
                if !column.allows_summary(kind) {
                    return Err(DefinitionError::DefaultSummaryNotAllowed {
                        column: column.id.clone(),
                        kind,
                    });
                }
            }
        }
        Ok(ColumnSet { columns, index })
    }

    pub fn get(&self, id: &str) -> Option<&ColumnSpec> {
        self.index.get(id).map(|&position| &self.columns[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn filterable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.filterable)
    }

    pub fn summarizable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_summarizable())
    }

    pub fn exportable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_exportable())
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
