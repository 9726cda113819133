//! Value sources: immutable expression nodes computing a per-document scalar.
//!
//! A source tree is built once per query and shared read-only by every
//! segment worker. Binding it to a segment with
//! [`ValueSource::get_values`] produces a fresh [`FunctionValues`] tree that
//! the worker owns.
//!
//! Equality and hashing are structural. Two nodes are equal when they are the
//! same kind with bit-identical parameters and equal children, which makes
//! `Arc<dyn ValueSource>` usable as a map key for caching per-segment work.

/// Constant-valued source.
pub mod constant;
/// Float column source.
pub mod field;
/// Linear transform `m*x + b`.
pub mod linear;
/// Reciprocal decay `a/(m*x + b)`.
pub mod reciprocal;
/// Searcher-wide rescaling onto a target range.
pub mod scale;

pub use constant::ConstValueSource;
pub use field::FloatFieldSource;
pub use linear::LinearFloatFunction;
pub use reciprocal::ReciprocalFloatFunction;
pub use scale::ScaleFloatFunction;

use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{IndexSearcher, SegmentContext};
use crate::values::FunctionValues;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Immutable, composable description of a per-document scalar function.
pub trait ValueSource: fmt::Debug + Send + Sync + 'static {
    /// Binds this source to one segment.
    ///
    /// `context` is shared by every node of the tree for one execution and
    /// must be passed through unmodified to child sources.
    fn get_values(&self, context: &EvalContext, segment: &SegmentContext) -> Result<Box<dyn FunctionValues>>;

    /// Searcher-wide preparation, run once per execution before any segment
    /// is bound. Sources that wrap others forward this to their children.
    fn create_weight(&self, _context: &EvalContext, _searcher: &IndexSearcher) -> Result<()> {
        Ok(())
    }

    /// Deterministic human-readable form of this node and its children.
    fn description(&self) -> String;

    /// Structural equality. Other kinds compare unequal.
    fn source_eq(&self, other: &dyn ValueSource) -> bool;

    /// Structural hash. Equal sources produce equal hashes.
    fn source_hash(&self) -> i32;

    fn as_any(&self) -> &dyn Any;
}

impl PartialEq for dyn ValueSource {
    fn eq(&self, other: &Self) -> bool {
        self.source_eq(other)
    }
}

impl Eq for dyn ValueSource {}

impl Hash for dyn ValueSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.source_hash());
    }
}

impl fmt::Display for dyn ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Bit pattern of `v` as a signed integer, with every NaN collapsed to the
/// canonical `0x7fc0_0000`.
#[inline]
pub fn float_to_int_bits(v: f32) -> i32 {
    if v.is_nan() {
        0x7fc0_0000
    } else {
        v.to_bits() as i32
    }
}

/// Bitwise parameter equality, consistent with [`float_to_int_bits`].
#[inline]
pub(crate) fn bits_eq(a: f32, b: f32) -> bool {
    float_to_int_bits(a) == float_to_int_bits(b)
}

/// 31-multiplier polynomial hash over the UTF-16 code units of `s`.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_float_to_int_bits() {
        assert_eq!(float_to_int_bits(1.0), 0x3f80_0000);
        assert_eq!(float_to_int_bits(-0.0), i32::MIN);
        assert_eq!(float_to_int_bits(f32::NAN), 0x7fc0_0000);
        assert_eq!(float_to_int_bits(f32::from_bits(0x7fc0_0001)), 0x7fc0_0000);
    }

    #[test]
    fn test_bits_eq_distinguishes_signed_zero() {
        assert!(!bits_eq(0.0, -0.0));
        assert!(bits_eq(f32::NAN, f32::NAN));
        assert!(bits_eq(1.5, 1.5));
    }

    #[test]
    fn test_string_hash() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        // Long enough to overflow 32 bits.
        assert_eq!(string_hash("hello world"), 1_794_106_052);
    }

    #[test]
    fn test_dyn_sources_as_set_keys() {
        let mut seen: HashSet<Arc<dyn ValueSource>> = HashSet::new();
        let field: Arc<dyn ValueSource> = Arc::new(FloatFieldSource::new("age"));
        seen.insert(Arc::new(ReciprocalFloatFunction::new(field.clone(), 1.0, 1.0, 1.0)));
        seen.insert(Arc::new(ReciprocalFloatFunction::new(
            Arc::new(FloatFieldSource::new("age")),
            1.0,
            1.0,
            1.0,
        )));
        seen.insert(Arc::new(ReciprocalFloatFunction::new(field.clone(), 2.0, 1.0, 1.0)));
        seen.insert(field);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_display_is_description() {
        let src: Arc<dyn ValueSource> = Arc::new(ConstValueSource::new(2.5));
        assert_eq!(src.to_string(), "const(2.5)");
    }
}
