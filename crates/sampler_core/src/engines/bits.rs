//! Bit-level construction of uniform floating-point values.
//!
//! The exclusive constructors place random bits in the mantissa of a number
//! whose exponent forces it into `[1, 2)` and subtract one, so every output
//! lies on a uniform grid without a floating divide. The inclusive
//! constructors divide by the integer maximum instead and can reach both
//! endpoints of `[0, 1]`.

/// Exponent and sign bits of `1.0_f32`.
pub const FLOAT_ONE_BITS: u32 = 0x3F80_0000;

/// Exponent and sign bits of `1.0_f64`.
pub const DOUBLE_ONE_BITS: u64 = 0x3FF0_0000_0000_0000;

/// Maps the high 23 bits of `x` to an `f32` in `[0, 1)`.
#[inline]
pub fn unit_f32(x: u32) -> f32 {
    f32::from_bits((x >> 9) | FLOAT_ONE_BITS) - 1.0
}

/// Maps the high 52 bits of `x` to an `f64` in `[0, 1)`.
#[inline]
pub fn unit_f64(x: u64) -> f64 {
    f64::from_bits((x >> 12) | DOUBLE_ONE_BITS) - 1.0
}

/// Places the 32 bits of `x` at the top of an `f64` mantissa, giving `[0, 1)`.
///
/// Used by 32-bit engines so a double costs one state step.
#[inline]
pub fn unit_f64_from_u32(x: u32) -> f64 {
    f64::from_bits(((x as u64) << 20) | DOUBLE_ONE_BITS) - 1.0
}

/// Maps `x` to an `f32` in `[0, 1]` by dividing by `u32::MAX`.
#[inline]
pub fn unit_f32_inclusive(x: u32) -> f32 {
    x as f32 / u32::MAX as f32
}

/// Maps `x` to an `f64` in `[0, 1]` by dividing by `u32::MAX`.
#[inline]
pub fn unit_f64_inclusive_from_u32(x: u32) -> f64 {
    x as f64 / u32::MAX as f64
}

/// Maps `x` to an `f64` in `[0, 1]` by dividing by `u64::MAX`.
#[inline]
pub fn unit_f64_inclusive(x: u64) -> f64 {
    x as f64 / u64::MAX as f64
}

/// Scales `x` into `[0, span)` with a widened multiply and shift.
#[inline]
pub fn scale_u32(x: u32, span: u32) -> u32 {
    ((x as u64 * span as u64) >> 32) as u32
}

/// Scales `x` into `[0, span)` with a widened multiply and shift.
#[inline]
pub fn scale_u64(x: u64, span: u64) -> u64 {
    ((x as u128 * span as u128) >> 64) as u64
}
