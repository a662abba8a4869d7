//! # **Real trait** - *Scalar abstraction for precision-generic kernels*

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use core::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Scalar type every kernel in the crate is generic over.
///
/// Any floating type implementing [`Float`] and [`FloatConst`] qualifies, which includes
/// the native `f64` and the common software extended-precision types. Kernels derive
/// their convergence thresholds from [`Float::epsilon`], so swapping the scalar changes
/// the attainable precision without touching any algorithm.
///
/// # Implementation Requirements
/// `epsilon`, `max_value` and `min_positive_value` must describe the type's own
/// precision and range; constants produced through [`Real::ratio`] are only as exact as
/// the type's division.
pub trait Real: Float + FloatConst + Debug + Display + Send + Sync + 'static {
    /// Converts a native literal. Values the type cannot represent become NaN.
    #[inline(always)]
    fn lit(v: f64) -> Self {
        <Self as num_traits::NumCast>::from(v).unwrap_or_else(Self::nan)
    }

    /// Exact rational constant `n / d`, evaluated in the type's own precision.
    ///
    /// Both operands must be exactly representable as `f64` (integers below 2^53).
    #[inline(always)]
    fn ratio(n: f64, d: f64) -> Self {
        Self::lit(n) / Self::lit(d)
    }

    /// Converts a count or index.
    #[inline(always)]
    fn from_usize(n: usize) -> Self {
        <Self as num_traits::NumCast>::from(n).unwrap_or_else(Self::nan)
    }

    /// Lossy conversion back to the native float. Non-convertible values become NaN.
    #[inline(always)]
    fn to_native(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// `1/2`, used often enough to deserve a name.
    #[inline(always)]
    fn half() -> Self {
        Self::ratio(1.0, 2.0)
    }

    /// `2`.
    #[inline(always)]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl Real for f64 {}
