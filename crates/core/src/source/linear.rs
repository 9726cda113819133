use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, IndexSearcher, SegmentContext};
use crate::source::{bits_eq, float_to_int_bits, ValueSource};
use crate::values::{FloatDocValues, FunctionValues};
use std::any::Any;
use std::sync::Arc;

/// `slope*float(source)+intercept`.
#[derive(Debug, Clone)]
pub struct LinearFloatFunction {
    source: Arc<dyn ValueSource>,
    slope: f32,
    intercept: f32,
}

impl LinearFloatFunction {
    pub fn new(source: Arc<dyn ValueSource>, slope: f32, intercept: f32) -> Self {
        Self {
            source,
            slope,
            intercept,
        }
    }
}

fn format_linear(slope: f32, inner: &str, intercept: f32) -> String {
    format!("{slope}*float({inner})+{intercept}")
}

struct LinearValues {
    source: Arc<dyn ValueSource>,
    inner: Box<dyn FunctionValues>,
    slope: f32,
    intercept: f32,
}

impl FloatDocValues for LinearValues {
    #[inline]
    fn float_val(&self, doc: DocId) -> f32 {
        self.inner.float_val(doc) * self.slope + self.intercept
    }

    fn description(&self) -> String {
        format_linear(self.slope, &self.source.description(), self.intercept)
    }

    fn describe(&self, doc: DocId) -> String {
        format_linear(self.slope, &self.inner.describe(doc), self.intercept)
    }
}

impl ValueSource for LinearFloatFunction {
    fn get_values(&self, context: &EvalContext, segment: &SegmentContext) -> Result<Box<dyn FunctionValues>> {
        let inner = self.source.get_values(context, segment)?;
        Ok(Box::new(LinearValues {
            source: Arc::clone(&self.source),
            inner,
            slope: self.slope,
            intercept: self.intercept,
        }))
    }

    fn create_weight(&self, context: &EvalContext, searcher: &IndexSearcher) -> Result<()> {
        self.source.create_weight(context, searcher)
    }

    fn description(&self) -> String {
        format_linear(self.slope, &self.source.description(), self.intercept)
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| {
            bits_eq(self.slope, o.slope)
                && bits_eq(self.intercept, o.intercept)
                && *self.source == *o.source
        })
    }

    fn source_hash(&self) -> i32 {
        let mut h = float_to_int_bits(self.slope).rotate_right(2);
        h = h.wrapping_add(float_to_int_bits(self.intercept));
        h ^= h.rotate_left(14);
        h.wrapping_add(self.source.source_hash())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
