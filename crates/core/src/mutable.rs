//! Reusable mutable value boxes for sort-key extraction.
//!
//! A [`ValueFiller`](crate::values::ValueFiller) owns one mutable value and
//! overwrites it for every document it visits. Whatever the filler exposes is
//! only valid until the next `fill_value` call; callers that keep values
//! around copy them out with [`MutableValue::duplicate`] or
//! [`MutableValue::copy_from`].

use crate::source::float_to_int_bits;
use ordered_float::OrderedFloat;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

/// Boxed per-document value returned by `object_val`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ValueObject {
    Float(f32),
}

impl ValueObject {
    pub fn as_f32(self) -> f32 {
        match self {
            ValueObject::Float(v) => v,
        }
    }
}

/// A single mutable scalar slot plus an existence flag.
pub trait MutableValue: fmt::Debug + Send {
    /// Whether the slot currently holds a defined value.
    fn exists(&self) -> bool;

    /// Boxed copy of the current value, `None` when it does not exist.
    fn to_object(&self) -> Option<ValueObject>;

    /// Overwrites this slot with `source`.
    ///
    /// # Panics
    /// Panics if `source` is a different kind of mutable value.
    fn copy_from(&mut self, source: &dyn MutableValue);

    /// Independent copy of this slot.
    fn duplicate(&self) -> Box<dyn MutableValue>;

    /// Value and existence equality. Different kinds are never equal.
    fn equals_same_type(&self, other: &dyn MutableValue) -> bool;

    /// Sort order between two slots of the same kind.
    ///
    /// Must agree with the score order of function queries: every NaN ties
    /// with every other NaN and sorts above `+inf`.
    ///
    /// # Panics
    /// Panics if `other` is a different kind of mutable value.
    fn compare_same_type(&self, other: &dyn MutableValue) -> Ordering;

    /// Bit-pattern hash of the current value.
    fn hash_code(&self) -> i32;

    fn as_any(&self) -> &dyn Any;
}

/// Mutable `f32` slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MutableValueFloat {
    pub value: f32,
    pub exists: bool,
}

impl MutableValueFloat {
    /// Copy of the value, `None` when it does not exist.
    pub fn get(&self) -> Option<f32> {
        self.exists.then_some(self.value)
    }

    fn downcast<'a>(other: &'a dyn MutableValue, op: &str) -> &'a MutableValueFloat {
        match other.as_any().downcast_ref::<MutableValueFloat>() {
            Some(v) => v,
            None => panic!("{op}: expected MutableValueFloat, got {other:?}"),
        }
    }
}

impl MutableValue for MutableValueFloat {
    fn exists(&self) -> bool {
        self.exists
    }

    fn to_object(&self) -> Option<ValueObject> {
        self.get().map(ValueObject::Float)
    }

    fn copy_from(&mut self, source: &dyn MutableValue) {
        *self = *Self::downcast(source, "copy_from");
    }

    fn duplicate(&self) -> Box<dyn MutableValue> {
        Box::new(*self)
    }

    fn equals_same_type(&self, other: &dyn MutableValue) -> bool {
        match other.as_any().downcast_ref::<MutableValueFloat>() {
            Some(o) => self.value == o.value && self.exists == o.exists,
            None => false,
        }
    }

    fn compare_same_type(&self, other: &dyn MutableValue) -> Ordering {
        let o = Self::downcast(other, "compare_same_type");
        // Missing sorts before present when the stored values tie.
        OrderedFloat(self.value)
            .cmp(&OrderedFloat(o.value))
            .then(self.exists.cmp(&o.exists))
    }

    fn hash_code(&self) -> i32 {
        float_to_int_bits(self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
