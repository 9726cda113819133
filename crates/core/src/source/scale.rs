//! Searcher-wide rescaling.
//!
//! `create_weight` scans every segment once to find the inner source's
//! observed `[from_min, from_max]`, then each document maps linearly onto
//! `[min, max]`. The observed range lives in the [`EvalContext`] so every
//! segment of one execution shares it.

use crate::context::EvalContext;
use crate::error::{FunctionError, Result};
use crate::index::{DocId, IndexSearcher, SegmentContext};
use crate::source::{bits_eq, float_to_int_bits, ValueSource};
use crate::values::{FloatDocValues, FunctionValues};
use std::any::Any;
use std::sync::Arc;

/// `scale(source, min, max)`.
#[derive(Debug, Clone)]
pub struct ScaleFloatFunction {
    source: Arc<dyn ValueSource>,
    min: f32,
    max: f32,
}

/// Observed range of the inner source across the whole searcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInfo {
    pub min_val: f32,
    pub max_val: f32,
}

impl ScaleFloatFunction {
    pub fn new(source: Arc<dyn ValueSource>, min: f32, max: f32) -> Self {
        Self { source, min, max }
    }

    fn context_key(&self) -> String {
        format!("scale-info:{}", self.description())
    }

    /// Non-finite values are skipped. With nothing finite the range is `[0, 0]`.
    fn compute_info(&self, context: &EvalContext, searcher: &IndexSearcher) -> Result<ScaleInfo> {
        let mut min_val = f32::INFINITY;
        let mut max_val = f32::NEG_INFINITY;
        for leaf in searcher.leaves() {
            let vals = self.source.get_values(context, leaf)?;
            for doc in 0..leaf.max_doc() {
                let v = vals.float_val(doc);
                if !v.is_finite() {
                    continue;
                }
                min_val = min_val.min(v);
                max_val = max_val.max(v);
            }
        }
        if min_val == f32::INFINITY {
            min_val = 0.0;
            max_val = 0.0;
        }
        Ok(ScaleInfo { min_val, max_val })
    }
}

struct ScaleValues {
    source: Arc<dyn ValueSource>,
    inner: Box<dyn FunctionValues>,
    info: ScaleInfo,
    scale: f32,
    min: f32,
    max: f32,
}

impl FloatDocValues for ScaleValues {
    #[inline]
    fn float_val(&self, doc: DocId) -> f32 {
        (self.inner.float_val(doc) - self.info.min_val) * self.scale + self.min
    }

    fn description(&self) -> String {
        format!("scale({},{},{})", self.source.description(), self.min, self.max)
    }

    fn describe(&self, doc: DocId) -> String {
        format!(
            "scale({},toMin={},toMax={},fromMin={},fromMax={})",
            self.inner.describe(doc),
            self.min,
            self.max,
            self.info.min_val,
            self.info.max_val
        )
    }
}

impl ValueSource for ScaleFloatFunction {
    fn get_values(&self, context: &EvalContext, segment: &SegmentContext) -> Result<Box<dyn FunctionValues>> {
        let info = context
            .get::<ScaleInfo>(&self.context_key())
            .ok_or_else(|| FunctionError::MissingWeight {
                description: self.description(),
            })?;
        let range = info.max_val - info.min_val;
        let scale = if range == 0.0 {
            0.0
        } else {
            (self.max - self.min) / range
        };
        let inner = self.source.get_values(context, segment)?;
        Ok(Box::new(ScaleValues {
            source: Arc::clone(&self.source),
            inner,
            info: *info,
            scale,
            min: self.min,
            max: self.max,
        }))
    }

    fn create_weight(&self, context: &EvalContext, searcher: &IndexSearcher) -> Result<()> {
        self.source.create_weight(context, searcher)?;
        let key = self.context_key();
        if context.contains(&key) {
            return Ok(());
        }
        let info = self.compute_info(context, searcher)?;
        tracing::debug!(
            source = %self.description(),
            from_min = info.min_val,
            from_max = info.max_val,
            "Computed scale range"
        );
        context.insert(key, info);
        Ok(())
    }

    fn description(&self) -> String {
        format!("scale({},{},{})", self.source.description(), self.min, self.max)
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| {
            bits_eq(self.min, o.min) && bits_eq(self.max, o.max) && *self.source == *o.source
        })
    }

    fn source_hash(&self) -> i32 {
        let mut h = float_to_int_bits(self.min).wrapping_mul(29);
        h = h.wrapping_add(float_to_int_bits(self.max)).wrapping_mul(29);
        h.wrapping_add(self.source.source_hash())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
