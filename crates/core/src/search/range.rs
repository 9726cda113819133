//! Range filtering on a value source.

use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, IndexSearcher};
use crate::source::ValueSource;

/// Bounds on a document's value. `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub lower: Option<f32>,
    pub upper: Option<f32>,
    pub include_lower: bool,
    pub include_upper: bool,
}

impl ValueRange {
    /// Inclusive on both ends.
    pub fn closed(lower: f32, upper: f32) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            include_lower: true,
            include_upper: true,
        }
    }

    /// `NaN` never matches.
    pub fn matches(&self, v: f32) -> bool {
        if v.is_nan() {
            return false;
        }
        let above = match self.lower {
            Some(l) if self.include_lower => v >= l,
            Some(l) => v > l,
            None => true,
        };
        let below = match self.upper {
            Some(u) if self.include_upper => v <= u,
            Some(u) => v < u,
            None => true,
        };
        above && below
    }
}

/// Global ids of documents whose value falls inside `range`, ascending.
pub fn range_filter(
    searcher: &IndexSearcher,
    source: &dyn ValueSource,
    range: &ValueRange,
) -> Result<Vec<DocId>> {
    let context = EvalContext::new();
    source.create_weight(&context, searcher)?;
    let mut matched = Vec::new();
    for leaf in searcher.leaves() {
        let values = source.get_values(&context, leaf)?;
        matched.extend(
            (0..leaf.max_doc())
                .filter(|&doc| range.matches(values.float_val(doc)))
                .map(|doc| leaf.doc_base + doc),
        );
    }
    tracing::debug!(source = %source, matched = matched.len(), "Range filter completed");
    Ok(matched)
}
