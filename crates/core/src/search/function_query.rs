//! Function queries.
//!
//! A [`FunctionQuery`] matches every document and scores it with
//! `boost * float_val(doc)`. [`boost_hits`] instead rescales scores that
//! some other query already produced.

use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, IndexSearcher};
use crate::search::types::ScoredDoc;
use crate::source::ValueSource;
use crate::values::FunctionValues;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Scores every document by a value source.
#[derive(Debug, Clone)]
pub struct FunctionQuery {
    source: Arc<dyn ValueSource>,
    boost: f32,
}

impl FunctionQuery {
    pub fn new(source: Arc<dyn ValueSource>) -> Self {
        Self { source, boost: 1.0 }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn source(&self) -> &Arc<dyn ValueSource> {
        &self.source
    }

    /// Top `k` documents by descending score. Ties keep the lower doc id.
    pub fn search(&self, searcher: &IndexSearcher, k: usize) -> Result<Vec<ScoredDoc>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let context = EvalContext::new();
        self.source.create_weight(&context, searcher)?;

        // Min-heap of size k; on equal scores the higher doc id is evicted first.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, Reverse<DocId>)>> =
            BinaryHeap::with_capacity(k + 1);
        for leaf in searcher.leaves() {
            let values = self.source.get_values(&context, leaf)?;
            tracing::trace!(segment = leaf.ord, max_doc = leaf.max_doc(), "Bound function values");
            for doc in 0..leaf.max_doc() {
                let score = self.boost * values.float_val(doc);
                heap.push(Reverse((OrderedFloat(score), Reverse(leaf.doc_base + doc))));
                if heap.len() > k {
                    heap.pop();
                }
            }
        }

        let mut results: Vec<ScoredDoc> = heap
            .into_iter()
            .map(|Reverse((score, Reverse(doc)))| ScoredDoc { doc, score: score.0 })
            .collect();
        results.sort_unstable_by(|a, b| {
            OrderedFloat(b.score)
                .cmp(&OrderedFloat(a.score))
                .then(a.doc.cmp(&b.doc))
        });
        tracing::debug!(
            source = %self.source,
            segments = searcher.leaves().len(),
            k,
            results = results.len(),
            "Function query completed"
        );
        Ok(results)
    }

    /// Human-readable breakdown of how `doc` (a global id) was scored.
    pub fn explain(&self, searcher: &IndexSearcher, doc: DocId) -> Result<String> {
        let (leaf, local) = searcher.sub_index(doc)?;
        let context = EvalContext::new();
        self.source.create_weight(&context, searcher)?;
        let values = self.source.get_values(&context, &searcher.leaves()[leaf])?;
        let score = self.boost * values.float_val(local);
        Ok(format!(
            "{score} = FunctionQuery({}), product of:\n  {}\n  boost={}",
            self.source,
            values.describe(local),
            self.boost
        ))
    }
}

/// Multiplies each `(global doc, score)` hit by the source's value for that
/// document. Output order follows `hits`.
pub fn boost_hits(
    searcher: &IndexSearcher,
    source: &dyn ValueSource,
    hits: &[(DocId, f32)],
) -> Result<Vec<ScoredDoc>> {
    let context = EvalContext::new();
    source.create_weight(&context, searcher)?;
    let bound = searcher
        .leaves()
        .iter()
        .map(|leaf| source.get_values(&context, leaf))
        .collect::<Result<Vec<Box<dyn FunctionValues>>>>()?;

    hits.iter()
        .map(|&(doc, score)| {
            let (leaf, local) = searcher.sub_index(doc)?;
            Ok(ScoredDoc {
                doc,
                score: score * bound[leaf].float_val(local),
            })
        })
        .collect()
}
