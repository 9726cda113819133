//! Global configuration constants for funcscore.
//!
//! Tuning defaults and input validation limits are defined here. These are
//! compile-time constants; runtime configuration is handled via CLI arguments
//! and environment variables in the `funcscore` binary.

/// Default multiplier `m` for the reciprocal decay `a/(m*x+b)`.
///
/// Converts milliseconds to years (there are about 3.16e10 ms per year), so a
/// document one year old scores about 1/2 and two years old about 1/3.
pub const RECIP_DEFAULT_M: f32 = 3.16e-11;

/// Default numerator `a` for the reciprocal decay.
///
/// When `a == b` and `x >= 0` the curve has a maximum of 1 at `x = 0`.
pub const RECIP_DEFAULT_A: f32 = 1.0;

/// Default offset `b` for the reciprocal decay.
///
/// Raising `a` and `b` together moves evaluation onto a flatter part of the curve.
pub const RECIP_DEFAULT_B: f32 = 1.0;

/// Seed mixed into the hash of every field-backed source.
pub const FIELD_SOURCE_HASH_SEED: i32 = 0x0cd6_d5b2;

/// Default number of results returned by a function query.
pub const DEFAULT_TOP_K: usize = 10;

/// Maximum number of results (`k`) per function query.
pub const MAX_K: usize = 10_000;

/// Default number of documents per in-memory segment.
pub const DEFAULT_SEGMENT_SIZE: usize = 1_000;

/// Maximum number of documents per in-memory segment.
pub const MAX_SEGMENT_SIZE: usize = 1 << 20;
