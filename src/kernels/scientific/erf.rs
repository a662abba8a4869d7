// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Function Module** - *Precision-Generic Error Functions*
//!
//! The error function, its complement and the scaled complement, expressed through the
//! incomplete gamma function of order ½ so they inherit the precision of the scalar.
//!
//! ## Mathematical Definitions
//!
//! ### Error Function
//! ```text
//! erf(x) = (2/√π) ∫₀ˣ e^(-t²) dt = sign(x) · P(½, x²)
//! ```
//!
//! ### Complementary Error Function
//! ```text
//! erfc(x) = 1 - erf(x) = Q(½, x²)            (x ≥ 0)
//! ```
//!
//! ### Scaled Complementary Error Function
//! ```text
//! erfcx(x) = e^(x²) erfc(x)
//! ```
//! `erfcx` stays finite and accurate for large positive `x` where `erfc` underflows,
//! which is what the Benktander moment formulas need.
//!
//! ## Usage Examples
//!
//! ```rust,ignore
//! use precision_kernels::kernels::scientific::erf::{erf, erfc, erfcx};
//!
//! let e = erf(0.3_f64);       // ≈ 0.3286
//! let c = erfc(3.0_f64);      // ≈ 2.209e-5
//! let s = erfcx(10.0_f64);    // ≈ 0.05614
//! ```

use crate::kernels::scientific::distributions::shared::scalar::{
    reg_lower_gamma, reg_upper_gamma, upper_gamma_continued_fraction,
};
use crate::traits::real::Real;

/// Error function. NaN propagates, `±∞` → `±1`.
#[inline]
pub fn erf<T: Real>(x: T) -> T {
    if x.is_nan() {
        return T::nan();
    }
    if x == T::zero() {
        return x;
    }
    let p = reg_lower_gamma(T::half(), x * x);
    if x < T::zero() {
        -p
    } else {
        p
    }
}

/// Complementary error function. NaN propagates, `+∞` → 0, `−∞` → 2.
#[inline]
pub fn erfc<T: Real>(x: T) -> T {
    if x.is_nan() {
        return T::nan();
    }
    if x < T::zero() {
        T::one() + reg_lower_gamma(T::half(), x * x)
    } else {
        reg_upper_gamma(T::half(), x * x)
    }
}

/// Scaled complementary error function e^{x²} erfc(x).
///
/// * `x ≥ √1.5`: the incomplete-gamma continued fraction gives the scaled value directly.
/// * `0 ≤ x < √1.5`: `exp(x²) · erfc(x)`.
/// * `x < 0`: reflection `2e^{x²} − erfcx(−x)`; overflows to `+∞` for large `|x|`.
pub fn erfcx<T: Real>(x: T) -> T {
    if x.is_nan() {
        return T::nan();
    }
    if x == T::infinity() {
        return T::zero();
    }
    if x < T::zero() {
        return T::two() * (x * x).exp() - erfcx(-x);
    }
    let z = x * x;
    if z >= T::lit(1.5) {
        // Γ(½, z) = e^{-z} √z h  ⇒  erfcx(x) = x h / √π
        x * upper_gamma_continued_fraction(T::half(), z) / T::PI().sqrt()
    } else {
        z.exp() * erfc(x)
    }
}
