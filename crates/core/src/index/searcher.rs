//! Searcher over an ordered list of segments.

use crate::error::{FunctionError, Result};
use crate::index::segment::{SegmentContext, SegmentReader};
use crate::index::DocId;
use std::sync::Arc;

/// Ordered set of segments sharing one global doc-id space.
///
/// Segment `i` owns global ids `doc_base(i) .. doc_base(i) + max_doc(i)`.
#[derive(Debug, Clone, Default)]
pub struct IndexSearcher {
    leaves: Vec<SegmentContext>,
    max_doc: DocId,
}

impl IndexSearcher {
    /// Builds a searcher, assigning doc bases in segment order.
    ///
    /// # Panics
    /// Panics if the segments hold more than `DocId::MAX` documents in total.
    /// Use [`IndexSearcher::try_new`] for segments built from external input.
    pub fn new(readers: Vec<Arc<SegmentReader>>) -> Self {
        Self::try_new(readers).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Builds a searcher, failing with `TooManyDocs` if the global doc-id
    /// space would overflow.
    pub fn try_new(readers: Vec<Arc<SegmentReader>>) -> Result<Self> {
        let mut doc_base: DocId = 0;
        let mut leaves = Vec::with_capacity(readers.len());
        for (ord, reader) in readers.into_iter().enumerate() {
            let next = doc_base.checked_add(reader.max_doc());
            let Some(next) = next else {
                let total = leaves_total(&leaves) + u64::from(reader.max_doc());
                return Err(FunctionError::TooManyDocs { total });
            };
            leaves.push(SegmentContext {
                ord,
                doc_base,
                reader,
            });
            doc_base = next;
        }
        Ok(Self {
            leaves,
            max_doc: doc_base,
        })
    }

    /// Per-segment contexts in doc-base order.
    pub fn leaves(&self) -> &[SegmentContext] {
        &self.leaves
    }

    /// Total documents across all segments.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Maps a global doc id to `(leaf ordinal, segment-local doc id)`.
    pub fn sub_index(&self, doc: DocId) -> Result<(usize, DocId)> {
        if doc >= self.max_doc {
            return Err(FunctionError::DocOutOfRange {
                doc,
                max_doc: self.max_doc,
            });
        }
        // Last leaf whose base is <= doc. Empty segments share a base with
        // their successor, so skip forward past them.
        let idx = self.leaves.partition_point(|leaf| leaf.doc_base <= doc) - 1;
        let leaf = &self.leaves[idx];
        Ok((idx, doc - leaf.doc_base))
    }
}

fn leaves_total(leaves: &[SegmentContext]) -> u64 {
    leaves.iter().map(|l| u64::from(l.max_doc())).sum()
}
