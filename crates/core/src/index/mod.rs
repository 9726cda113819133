//! Minimal in-memory segment model that value sources bind against.
//!
//! Segments are immutable once built. Each carries named float columns with a
//! docs-with-field bitmap so that "no value" stays distinct from `0.0`.

/// Float columns, segment readers, and per-segment contexts.
pub mod segment;
/// Ordered segment list with global doc-id mapping.
pub mod searcher;

pub use searcher::IndexSearcher;
pub use segment::{FloatColumn, SegmentContext, SegmentReader};

/// Segment-local document id.
pub type DocId = u32;
