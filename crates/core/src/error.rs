//! Error types for function evaluation.
//!
//! Arithmetic edge cases (division by zero, overflow) are not errors: they
//! surface as IEEE-754 infinities or NaN. Only boundary misuse that a caller
//! can recover from is reported here.

use crate::index::DocId;
use thiserror::Error;

/// Result type for function evaluation operations.
pub type Result<T> = std::result::Result<T, FunctionError>;

/// Errors returned at the searcher and segment boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// A global document id does not belong to any segment of the searcher.
    #[error("document {doc} out of range (max_doc={max_doc})")]
    DocOutOfRange { doc: DocId, max_doc: DocId },

    /// A field column does not have exactly one slot per segment document.
    #[error("column '{field}' has {found} values, segment has {expected} documents")]
    ColumnLength {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Segment sizes add up to more documents than a global doc id can address.
    #[error("searcher would hold {total} documents, limit is {}", DocId::MAX)]
    TooManyDocs { total: u64 },

    /// A source needing searcher-wide preparation was bound before `create_weight`.
    #[error("no weight prepared for '{description}'; call create_weight first")]
    MissingWeight { description: String },
}
