//! Reciprocal decay `f(x) = a/(m*x + b)`.
//!
//! With `a == b` and `x >= 0` the curve peaks at 1 for `x = 0` and falls as
//! `x` grows, which makes it a natural recency boost. For a field holding
//! document age in milliseconds, `m = 3.16e-11` converts to years: a fresh
//! document scores about `1/(0+1) = 1`, a one year old one about `1/2` and a
//! two year old one about `1/3`.
//!
//! The arithmetic is plain IEEE-754 single precision. A zero denominator
//! yields an infinity (or NaN for `0/0`) rather than an error.

use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, IndexSearcher, SegmentContext};
use crate::source::{bits_eq, float_to_int_bits, ValueSource};
use crate::values::{FloatDocValues, FunctionValues};
use std::any::Any;
use std::sync::Arc;

/// `a/(m*float(source)+b)` over an inner source.
#[derive(Debug, Clone)]
pub struct ReciprocalFloatFunction {
    source: Arc<dyn ValueSource>,
    m: f32,
    a: f32,
    b: f32,
}

impl ReciprocalFloatFunction {
    pub fn new(source: Arc<dyn ValueSource>, m: f32, a: f32, b: f32) -> Self {
        Self { source, m, a, b }
    }

    pub fn source(&self) -> &Arc<dyn ValueSource> {
        &self.source
    }

    /// `(m, a, b)`.
    pub fn params(&self) -> (f32, f32, f32) {
        (self.m, self.a, self.b)
    }
}

fn format_recip(a: f32, m: f32, inner: &str, b: f32) -> String {
    format!("{a}/({m}*float({inner})+{b})")
}

/// Evaluator for one segment. Holds a copy of the parameters, never the
/// owning function.
struct ReciprocalValues {
    source: Arc<dyn ValueSource>,
    inner: Box<dyn FunctionValues>,
    m: f32,
    a: f32,
    b: f32,
}

impl FloatDocValues for ReciprocalValues {
    #[inline]
    fn float_val(&self, doc: DocId) -> f32 {
        self.a / (self.m * self.inner.float_val(doc) + self.b)
    }

    fn description(&self) -> String {
        format_recip(self.a, self.m, &self.source.description(), self.b)
    }

    fn describe(&self, doc: DocId) -> String {
        format_recip(self.a, self.m, &self.inner.describe(doc), self.b)
    }
}

impl ValueSource for ReciprocalFloatFunction {
    fn get_values(&self, context: &EvalContext, segment: &SegmentContext) -> Result<Box<dyn FunctionValues>> {
        let inner = self.source.get_values(context, segment)?;
        Ok(Box::new(ReciprocalValues {
            source: Arc::clone(&self.source),
            inner,
            m: self.m,
            a: self.a,
            b: self.b,
        }))
    }

    fn create_weight(&self, context: &EvalContext, searcher: &IndexSearcher) -> Result<()> {
        self.source.create_weight(context, searcher)
    }

    fn description(&self) -> String {
        format_recip(self.a, self.m, &self.source.description(), self.b)
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| {
            bits_eq(self.m, o.m)
                && bits_eq(self.a, o.a)
                && bits_eq(self.b, o.b)
                && *self.source == *o.source
        })
    }

    fn source_hash(&self) -> i32 {
        let mut h = float_to_int_bits(self.a).wrapping_add(float_to_int_bits(self.m));
        h ^= h.rotate_left(13);
        h.wrapping_add(float_to_int_bits(self.b))
            .wrapping_add(self.source.source_hash())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
