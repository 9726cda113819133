//! Segment readers and float columns.

use crate::error::{FunctionError, Result};
use crate::index::DocId;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-document `f32` values for one field within one segment.
///
/// Documents without a value read as `0.0` and report `false` from
/// [`FloatColumn::has_value`].
#[derive(Debug, Clone, Default)]
pub struct FloatColumn {
    values: Vec<f32>,
    docs_with_field: Vec<bool>,
}

impl FloatColumn {
    /// Builds a column from optional per-document values.
    pub fn from_options(values: impl IntoIterator<Item = Option<f32>>) -> Self {
        let (values, docs_with_field): (Vec<f32>, Vec<bool>) = values
            .into_iter()
            .map(|v| (v.unwrap_or(0.0), v.is_some()))
            .unzip();
        Self {
            values,
            docs_with_field,
        }
    }

    /// Builds a dense column where every document has a value.
    pub fn dense(values: Vec<f32>) -> Self {
        let docs_with_field = vec![true; values.len()];
        Self {
            values,
            docs_with_field,
        }
    }

    /// Number of document slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for `doc`, `0.0` when the document has none.
    ///
    /// # Panics
    /// Panics if `doc` is outside the column.
    #[inline]
    pub fn get(&self, doc: DocId) -> f32 {
        self.values[doc as usize]
    }

    /// Whether `doc` has a value for this field.
    ///
    /// # Panics
    /// Panics if `doc` is outside the column.
    #[inline]
    pub fn has_value(&self, doc: DocId) -> bool {
        self.docs_with_field[doc as usize]
    }
}

/// An immutable segment: a document count plus named float columns.
#[derive(Debug, Default)]
pub struct SegmentReader {
    max_doc: DocId,
    float_fields: HashMap<String, Arc<FloatColumn>>,
}

impl SegmentReader {
    /// Creates a segment with `max_doc` documents and no columns.
    pub fn new(max_doc: DocId) -> Self {
        Self {
            max_doc,
            float_fields: HashMap::new(),
        }
    }

    /// Attaches a float column, replacing any column with the same name.
    ///
    /// Fails if the column does not have one slot per document.
    pub fn with_float_field(mut self, field: impl Into<String>, column: FloatColumn) -> Result<Self> {
        let field = field.into();
        if column.len() != self.max_doc as usize {
            return Err(FunctionError::ColumnLength {
                field,
                expected: self.max_doc as usize,
                found: column.len(),
            });
        }
        self.float_fields.insert(field, Arc::new(column));
        Ok(self)
    }

    /// Number of documents in this segment.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Shared handle to the named float column, if this segment has one.
    pub fn float_field(&self, field: &str) -> Option<Arc<FloatColumn>> {
        self.float_fields.get(field).cloned()
    }
}

/// A segment as seen by one searcher: its position and global doc base.
#[derive(Debug, Clone)]
pub struct SegmentContext {
    /// Position of this segment in the searcher's leaf list.
    pub ord: usize,
    /// Global doc id of this segment's first document.
    pub doc_base: DocId,
    /// The segment's data.
    pub reader: Arc<SegmentReader>,
}

impl SegmentContext {
    /// Number of documents in this segment.
    pub fn max_doc(&self) -> DocId {
        self.reader.max_doc()
    }
}
