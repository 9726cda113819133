//! Per-segment evaluators.
//!
//! A [`FunctionValues`] is what a value source becomes once bound to one
//! segment. It answers typed questions about segment-local doc ids and is
//! owned by a single caller: evaluators are never shared between workers.

/// Float-typed evaluators: one required accessor, every other view derived.
pub mod float;

pub use float::{FloatDocValues, FloatValueFiller};

use crate::index::DocId;
use crate::mutable::{MutableValue, ValueObject};

/// Typed accessors for documents of one bound segment.
///
/// Doc ids are segment-local. Calls may arrive in any order; passing an id
/// outside the segment is a caller bug and panics.
pub trait FunctionValues {
    fn byte_val(&self, doc: DocId) -> i8;
    fn short_val(&self, doc: DocId) -> i16;
    fn int_val(&self, doc: DocId) -> i32;
    fn long_val(&self, doc: DocId) -> i64;
    fn float_val(&self, doc: DocId) -> f32;
    fn double_val(&self, doc: DocId) -> f64;
    fn str_val(&self, doc: DocId) -> String;

    /// Boxed value, or `None` when `exists(doc)` is false.
    fn object_val(&self, doc: DocId) -> Option<ValueObject>;

    /// Whether a value is defined for `doc`. Distinct from the value being zero.
    fn exists(&self, _doc: DocId) -> bool {
        true
    }

    /// Diagnostic rendering of this evaluator's value for `doc`.
    fn describe(&self, doc: DocId) -> String;

    /// Filler for allocation-free extraction of per-document sort keys.
    fn value_filler(&self) -> Box<dyn ValueFiller + '_>;
}

/// Reusable sink plus the operation that refreshes it for one document.
pub trait ValueFiller {
    /// The sink itself. Only valid until the next [`fill_value`](Self::fill_value).
    fn value(&self) -> &dyn MutableValue;

    /// Overwrites the sink with `doc`'s value and existence.
    fn fill_value(&mut self, doc: DocId);
}
