//! Float-typed evaluators.
//!
//! Implement [`FloatDocValues`] and the blanket impl supplies the whole
//! [`FunctionValues`] surface from `float_val` alone:
//!
//! - integer views truncate toward zero, then wrap modulo the target width
//!   (`130.9` as a byte is `-126`, not `127`); `NaN` becomes 0
//! - `double_val` widens losslessly
//! - `str_val` is the shortest round-trip decimal form (`2.0` renders as `2`)
//! - `object_val` is `None` whenever `exists` is false

use crate::index::DocId;
use crate::mutable::{MutableValue, MutableValueFloat, ValueObject};
use crate::values::{FunctionValues, ValueFiller};

/// An evaluator whose authoritative value is an `f32`.
pub trait FloatDocValues {
    /// Value for `doc`.
    fn float_val(&self, doc: DocId) -> f32;

    /// Description of the source this evaluator was bound from.
    fn description(&self) -> String;

    fn exists(&self, _doc: DocId) -> bool {
        true
    }

    /// `"<description>=<value>"`.
    fn describe(&self, doc: DocId) -> String {
        format!("{}={}", self.description(), FloatDocValues::float_val(self, doc))
    }

    /// Typed filler, for callers that know they hold a float evaluator.
    fn float_filler(&self) -> FloatValueFiller<'_, Self>
    where
        Self: Sized,
    {
        FloatValueFiller::new(self)
    }
}

/// `2^63`, the first magnitude `as i64` would saturate.
const TWO_POW_63: f32 = 9_223_372_036_854_775_808.0;

/// Truncates toward zero, then wraps modulo `2^64`.
///
/// Every finite `f32` at or above `2^63` in magnitude is an integer, so its
/// residue is exact: the significand shifted into place, with bits past the
/// 64th dropped. `NaN` narrows to 0 and the infinities to the `i64` bounds.
#[inline]
fn truncate(v: f32) -> i64 {
    if !v.is_finite() || v.abs() < TWO_POW_63 {
        return v as i64;
    }
    let bits = v.to_bits();
    let exponent = ((bits >> 23) & 0xff) as u32;
    let significand = u64::from((bits & 0x7f_ffff) | 0x80_0000);
    // Biased exponent is at least 190 here, so the shift is at least 40.
    let shift = exponent - 127 - 23;
    let magnitude = significand.checked_shl(shift).unwrap_or(0) as i64;
    if v.is_sign_negative() {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

impl<T: FloatDocValues> FunctionValues for T {
    fn byte_val(&self, doc: DocId) -> i8 {
        truncate(FloatDocValues::float_val(self, doc)) as i8
    }

    fn short_val(&self, doc: DocId) -> i16 {
        truncate(FloatDocValues::float_val(self, doc)) as i16
    }

    fn int_val(&self, doc: DocId) -> i32 {
        truncate(FloatDocValues::float_val(self, doc)) as i32
    }

    fn long_val(&self, doc: DocId) -> i64 {
        truncate(FloatDocValues::float_val(self, doc))
    }

    fn float_val(&self, doc: DocId) -> f32 {
        FloatDocValues::float_val(self, doc)
    }

    fn double_val(&self, doc: DocId) -> f64 {
        f64::from(FloatDocValues::float_val(self, doc))
    }

    fn str_val(&self, doc: DocId) -> String {
        FloatDocValues::float_val(self, doc).to_string()
    }

    fn object_val(&self, doc: DocId) -> Option<ValueObject> {
        FloatDocValues::exists(self, doc)
            .then(|| ValueObject::Float(FloatDocValues::float_val(self, doc)))
    }

    fn exists(&self, doc: DocId) -> bool {
        FloatDocValues::exists(self, doc)
    }

    fn describe(&self, doc: DocId) -> String {
        FloatDocValues::describe(self, doc)
    }

    fn value_filler(&self) -> Box<dyn ValueFiller + '_> {
        Box::new(FloatValueFiller::new(self))
    }
}

/// Filler over a float evaluator. Owns one [`MutableValueFloat`] for its lifetime.
#[derive(Debug)]
pub struct FloatValueFiller<'a, V: ?Sized> {
    values: &'a V,
    mval: MutableValueFloat,
}

impl<'a, V: FloatDocValues + ?Sized> FloatValueFiller<'a, V> {
    pub fn new(values: &'a V) -> Self {
        Self {
            values,
            mval: MutableValueFloat::default(),
        }
    }

    /// Typed view of the sink. Only valid until the next fill.
    pub fn float_value(&self) -> &MutableValueFloat {
        &self.mval
    }
}

impl<V: FloatDocValues + ?Sized> ValueFiller for FloatValueFiller<'_, V> {
    fn value(&self) -> &dyn MutableValue {
        &self.mval
    }

    fn fill_value(&mut self, doc: DocId) {
        self.mval.value = FloatDocValues::float_val(self.values, doc);
        self.mval.exists = FloatDocValues::exists(self.values, doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluator over a fixed slice; `NaN` slots are treated as missing.
    struct Fixed(Vec<f32>);

    impl FloatDocValues for Fixed {
        fn float_val(&self, doc: DocId) -> f32 {
            let v = self.0[doc as usize];
            if v.is_nan() {
                0.0
            } else {
                v
            }
        }
        fn description(&self) -> String {
            "fixed".to_string()
        }
        fn exists(&self, doc: DocId) -> bool {
            !self.0[doc as usize].is_nan()
        }
    }

    /// Evaluator that returns its value verbatim, NaN included.
    struct Raw(f32);

    impl FloatDocValues for Raw {
        fn float_val(&self, _doc: DocId) -> f32 {
            self.0
        }
        fn description(&self) -> String {
            "raw".to_string()
        }
    }

    fn single(v: f32) -> Box<dyn FunctionValues> {
        Box::new(Fixed(vec![v]))
    }

    #[test]
    fn test_byte_wraps_instead_of_saturating() {
        assert_eq!(single(130.9).byte_val(0), -126);
        assert_eq!(single(-130.9).byte_val(0), 126);
        assert_eq!(single(255.0).byte_val(0), -1);
        assert_eq!(single(256.5).byte_val(0), 0);
    }

    #[test]
    fn test_short_and_int_wrap() {
        assert_eq!(single(32768.0).short_val(0), i16::MIN);
        assert_eq!(single(-32769.0).short_val(0), i16::MAX);
        assert_eq!(single(2_147_483_648.0).int_val(0), i32::MIN);
        assert_eq!(single(4_294_967_296.0).int_val(0), 0);
    }

    #[test]
    fn test_wrap_beyond_i64_range() {
        // 1e19 as f32 is exactly 9_999_999_980_506_447_872
        let v = single(1.0e19);
        assert_eq!(v.long_val(0), -8_446_744_093_203_103_744);
        assert_eq!(v.int_val(0), 0);
        assert_eq!(v.short_val(0), 0);
        assert_eq!(v.byte_val(0), 0);

        let v = single(-1.0e19);
        assert_eq!(v.long_val(0), 8_446_744_093_203_103_744);
        assert_eq!(v.int_val(0), 0);
    }

    #[test]
    fn test_wrap_at_i64_boundary() {
        assert_eq!(single(TWO_POW_63).long_val(0), i64::MIN);
        assert_eq!(single(-TWO_POW_63).long_val(0), i64::MIN);
        assert_eq!(single(2.0 * TWO_POW_63).long_val(0), 0);
        assert_eq!(single(f32::MAX).long_val(0), 0);
        // Largest f32 below 2^63 still converts directly.
        let below = f32::from_bits(TWO_POW_63.to_bits() - 1);
        assert_eq!(single(below).long_val(0), below as i64);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let v = single(-2.9);
        assert_eq!(v.byte_val(0), -2);
        assert_eq!(v.short_val(0), -2);
        assert_eq!(v.int_val(0), -2);
        assert_eq!(v.long_val(0), -2);
        assert_eq!(single(0.99).int_val(0), 0);
    }

    #[test]
    fn test_non_finite_narrowing() {
        let nan: Box<dyn FunctionValues> = Box::new(Raw(f32::NAN));
        assert_eq!(nan.long_val(0), 0);
        assert_eq!(nan.byte_val(0), 0);
        assert_eq!(single(f32::INFINITY).long_val(0), i64::MAX);
        assert_eq!(single(f32::NEG_INFINITY).long_val(0), i64::MIN);
        assert_eq!(single(f32::INFINITY).int_val(0), -1);
        assert_eq!(single(f32::INFINITY).byte_val(0), -1);
    }

    #[test]
    fn test_double_val_is_lossless() {
        let v = single(0.1);
        assert_eq!(v.double_val(0), 0.1f32 as f64);
        assert_eq!(v.double_val(0) as f32, 0.1f32);
    }

    #[test]
    fn test_str_val_formatting() {
        assert_eq!(single(2.0).str_val(0), "2");
        assert_eq!(single(0.5).str_val(0), "0.5");
        assert_eq!(single(-1.25).str_val(0), "-1.25");
        assert_eq!(single(f32::INFINITY).str_val(0), "inf");
    }

    #[test]
    fn test_object_val_absent_when_missing() {
        let v: Box<dyn FunctionValues> = Box::new(Fixed(vec![f32::NAN, 0.0]));
        assert!(!v.exists(0));
        assert_eq!(v.float_val(0), 0.0);
        assert_eq!(v.object_val(0), None);
        assert!(v.exists(1));
        assert_eq!(v.object_val(1), Some(ValueObject::Float(0.0)));
    }

    #[test]
    fn test_describe_uses_description() {
        assert_eq!(single(1.5).describe(0), "fixed=1.5");
    }

    #[test]
    fn test_filler_overwrites_previous_doc() {
        let values = Fixed(vec![7.0, f32::NAN, 3.0]);
        let mut filler = values.float_filler();
        filler.fill_value(0);
        assert_eq!(filler.float_value().get(), Some(7.0));
        filler.fill_value(1);
        assert_eq!(*filler.float_value(), MutableValueFloat { value: 0.0, exists: false });
        filler.fill_value(2);
        assert_eq!(filler.float_value().get(), Some(3.0));
        filler.fill_value(0);
        assert_eq!(filler.float_value().get(), Some(7.0));
    }

    #[test]
    fn test_boxed_filler_exposes_sink_by_reference() {
        let values: Box<dyn FunctionValues> = Box::new(Fixed(vec![1.0, 2.0]));
        let mut filler = values.value_filler();
        filler.fill_value(1);
        let kept = filler.value().duplicate();
        filler.fill_value(0);
        assert_eq!(filler.value().to_object(), Some(ValueObject::Float(1.0)));
        assert_eq!(kept.to_object(), Some(ValueObject::Float(2.0)));
    }
}
