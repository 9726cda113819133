//! # funcscore-core
//!
//! Per-document function values for search scoring. A query describes a
//! scalar function of a document as a tree of value sources (for example a
//! reciprocal decay over a numeric field). The tree is bound once per index
//! segment and then evaluated lazily for each matching document, either as a
//! score or as a sort key.
//!
//! ```text
//! ValueSource tree ──get_values(segment)──▶ FunctionValues tree
//!                                             ├─ float_val(doc) ─▶ score
//!                                             └─ value_filler() ─▶ sort key
//! ```
//!
//! This crate does no I/O and has no async dependencies.

/// Global configuration constants: defaults and limits.
pub mod config;
/// Per-query-execution key/value context shared by a source tree.
pub mod context;
/// Error type and result alias.
pub mod error;
/// In-memory segments, float columns, and the searcher.
pub mod index;
/// Mutable value boxes used as reusable sort-key sinks.
pub mod mutable;
/// Function queries, boosting, range filtering, and sorting by value.
pub mod search;
/// Value sources: const, field, linear, reciprocal, and scale.
pub mod source;
/// Per-segment evaluators and fillers.
pub mod values;

pub use context::EvalContext;
pub use error::{FunctionError, Result};
pub use index::{DocId, IndexSearcher, SegmentContext, SegmentReader};
pub use source::ValueSource;
pub use values::{FloatDocValues, FunctionValues, ValueFiller};
