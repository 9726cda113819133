use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, SegmentContext};
use crate::source::{bits_eq, float_to_int_bits, ValueSource};
use crate::values::{FloatDocValues, FunctionValues};
use std::any::Any;

/// The same value for every document.
#[derive(Debug, Clone, Copy)]
pub struct ConstValueSource {
    constant: f32,
}

impl ConstValueSource {
    pub fn new(constant: f32) -> Self {
        Self { constant }
    }

    pub fn constant(&self) -> f32 {
        self.constant
    }
}

#[derive(Debug)]
struct ConstValues {
    constant: f32,
}

impl FloatDocValues for ConstValues {
    fn float_val(&self, _doc: DocId) -> f32 {
        self.constant
    }

    fn description(&self) -> String {
        format!("const({})", self.constant)
    }
}

impl ValueSource for ConstValueSource {
    fn get_values(&self, _context: &EvalContext, _segment: &SegmentContext) -> Result<Box<dyn FunctionValues>> {
        Ok(Box::new(ConstValues {
            constant: self.constant,
        }))
    }

    fn description(&self) -> String {
        format!("const({})", self.constant)
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| bits_eq(self.constant, o.constant))
    }

    fn source_hash(&self) -> i32 {
        float_to_int_bits(self.constant).wrapping_mul(31)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
