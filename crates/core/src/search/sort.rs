//! Sorting documents by a value source.
//!
//! Sort keys come out of each segment's [`ValueFiller`]. The filler's sink is
//! overwritten per document, so a key is copied into a heap slot only when it
//! is competitive. Once the heap holds `k` slots, a competitive document is
//! copied into the evicted slot in place and no further boxes are allocated.
//!
//! [`ValueFiller`]: crate::values::ValueFiller

use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, IndexSearcher};
use crate::mutable::{MutableValue, ValueObject};
use crate::search::types::SortedDoc;
use crate::source::ValueSource;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Direction of a value sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// `Less` means `(a_key, a_doc)` sorts before `(b_key, b_doc)`. Equal keys
/// fall back to ascending doc id in both directions.
fn rank(
    order: SortOrder,
    a_key: &dyn MutableValue,
    a_doc: DocId,
    b_key: &dyn MutableValue,
    b_doc: DocId,
) -> Ordering {
    let by_key = a_key.compare_same_type(b_key);
    let by_key = match order {
        SortOrder::Ascending => by_key,
        SortOrder::Descending => by_key.reverse(),
    };
    by_key.then(a_doc.cmp(&b_doc))
}

/// Retained sort key. The heap's maximum is the worst retained document.
#[derive(Debug)]
struct Slot {
    key: Box<dyn MutableValue>,
    doc: DocId,
    order: SortOrder,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(self.order, &*self.key, self.doc, &*other.key, other.doc)
    }
}

/// Top `k` documents ordered by the source's value.
pub fn sort_by_source(
    searcher: &IndexSearcher,
    source: &dyn ValueSource,
    order: SortOrder,
    k: usize,
) -> Result<Vec<SortedDoc>> {
    if k == 0 {
        return Ok(Vec::new());
    }
    let context = EvalContext::new();
    source.create_weight(&context, searcher)?;

    let mut heap: BinaryHeap<Slot> = BinaryHeap::with_capacity(k);
    for leaf in searcher.leaves() {
        let values = source.get_values(&context, leaf)?;
        let mut filler = values.value_filler();
        for doc in 0..leaf.max_doc() {
            filler.fill_value(doc);
            let global = leaf.doc_base + doc;
            if heap.len() < k {
                heap.push(Slot {
                    key: filler.value().duplicate(),
                    doc: global,
                    order,
                });
                continue;
            }
            if let Some(mut worst) = heap.peek_mut() {
                if rank(order, filler.value(), global, &*worst.key, worst.doc) == Ordering::Less {
                    worst.key.copy_from(filler.value());
                    worst.doc = global;
                }
            }
        }
    }

    let results: Vec<SortedDoc> = heap
        .into_sorted_vec()
        .into_iter()
        .map(|slot| SortedDoc {
            doc: slot.doc,
            value: slot.key.to_object().map(ValueObject::as_f32),
        })
        .collect();
    tracing::debug!(source = %source, ?order, k, results = results.len(), "Value sort completed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{FloatColumn, SegmentReader};
    use crate::source::{FloatFieldSource, ReciprocalFloatFunction};
    use std::sync::Arc;

    fn searcher() -> IndexSearcher {
        let seg = |vals: Vec<Option<f32>>| {
            Arc::new(
                SegmentReader::new(vals.len() as DocId)
                    .with_float_field("price", FloatColumn::from_options(vals))
                    .unwrap(),
            )
        };
        IndexSearcher::new(vec![
            seg(vec![Some(5.0), None, Some(2.0)]),
            seg(vec![Some(8.0), Some(2.0), Some(0.0)]),
        ])
    }

    fn price() -> FloatFieldSource {
        FloatFieldSource::new("price")
    }

    fn docs(rows: &[SortedDoc]) -> Vec<DocId> {
        rows.iter().map(|r| r.doc).collect()
    }

    #[test]
    fn test_ascending_puts_missing_first_on_tie() {
        let rows = sort_by_source(&searcher(), &price(), SortOrder::Ascending, 10).unwrap();
        // doc 1 (missing, 0.0) sorts before doc 5 (present 0.0)
        assert_eq!(docs(&rows), vec![1, 5, 2, 4, 0, 3]);
        assert_eq!(rows[0].value, None);
        assert_eq!(rows[1].value, Some(0.0));
    }

    #[test]
    fn test_descending_top_k() {
        let rows = sort_by_source(&searcher(), &price(), SortOrder::Descending, 3).unwrap();
        assert_eq!(docs(&rows), vec![3, 0, 2]);
        assert_eq!(rows[0].value, Some(8.0));
        assert_eq!(rows[2].value, Some(2.0));
    }

    #[test]
    fn test_ascending_top_k_replaces_in_place() {
        let rows = sort_by_source(&searcher(), &price(), SortOrder::Ascending, 2).unwrap();
        assert_eq!(docs(&rows), vec![1, 5]);
    }

    #[test]
    fn test_sort_by_reciprocal() {
        let recip = ReciprocalFloatFunction::new(Arc::new(price()), 1.0, 1.0, 1.0);
        let rows = sort_by_source(&searcher(), &recip, SortOrder::Descending, 2).unwrap();
        // recip of missing and of 0.0 are both 1.0 and both "exist"
        assert_eq!(docs(&rows), vec![1, 5]);
        assert_eq!(rows[0].value, Some(1.0));
    }

    #[test]
    fn test_zero_k() {
        assert!(sort_by_source(&searcher(), &price(), SortOrder::Ascending, 0)
            .unwrap()
            .is_empty());
    }
}
