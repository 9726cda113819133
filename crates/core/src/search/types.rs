//! Result rows for function queries.

use crate::index::DocId;
use serde::Serialize;

/// A document with the score a function query assigned to it.
///
/// `doc` is a global id across all segments of the searcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc: DocId,
    pub score: f32,
}

/// A document with its sort key. `value` is `None` when the source has no
/// value for the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SortedDoc {
    pub doc: DocId,
    pub value: Option<f32>,
}
