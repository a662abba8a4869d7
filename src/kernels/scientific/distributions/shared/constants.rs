// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *Exact Coefficients for Precision-Generic Kernels*
//!
//! Coefficients used by the special-function kernels. Everything that feeds a result
//! at full precision is stored as an exact rational `(numerator, denominator)` pair and
//! divided in the target scalar, so the same table serves `f64` and extended types.
//! The Acklam coefficients are only ever used to seed iterative solvers and stay `f64`.

// ******** Asymptotic series ****************************************/

/// Even Bernoulli numbers `B_2, B_4, …, B_34` as exact rationals.
///
/// Drive the Stirling series for ln Γ and the asymptotic series for ψ. Seventeen
/// terms at argument ≥ 20 reach below 1e-34 relative, which covers double-double
/// and quad scalars.
pub(crate) const BERNOULLI_EVEN: [(f64, f64); 17] = [
    (1.0, 6.0),
    (-1.0, 30.0),
    (1.0, 42.0),
    (-1.0, 30.0),
    (5.0, 66.0),
    (-691.0, 2730.0),
    (7.0, 6.0),
    (-3617.0, 510.0),
    (43867.0, 798.0),
    (-174611.0, 330.0),
    (854513.0, 138.0),
    (-236364091.0, 2730.0),
    (8553103.0, 6.0),
    (-23749461029.0, 870.0),
    (8615841276005.0, 14322.0),
    (-7709321041217.0, 510.0),
    (2577687858367.0, 6.0),
];

/// Smallest argument at which the Stirling series is applied; smaller arguments are
/// shifted upward by recurrence. The working shift grows with the scalar's precision
/// as `STIRLING_SHIFT_PER_DIGIT · ln(1/ε)`.
pub(crate) const STIRLING_SHIFT_MIN: f64 = 8.0;

/// Shift growth per natural-log unit of precision.
pub(crate) const STIRLING_SHIFT_PER_DIGIT: f64 = 0.3;

/// Positive integers up to this bound get ln Γ from an exact factorial product.
pub(crate) const LN_GAMMA_EXACT_INT: f64 = 24.0;

/// Above this argument the scaled Bessel and Kummer kernels try their large-argument
/// asymptotic expansions before falling back to the power series.
pub(crate) const ASYMPTOTIC_ARGUMENT: f64 = 40.0;

/// Rescaling threshold for long positive series summed in the log domain.
pub(crate) const SERIES_RESCALE: f64 = 1e100;

// ******** Large-shape incomplete gamma ******************************/

/// Shape from which P(a, x) and Q(a, x) near the transition `x ≈ a` switch to Temme's
/// uniform asymptotic expansion. Below it the power series and continued fraction
/// converge well inside `SERIES_MAX_ITER` at every supported precision.
pub(crate) const TEMME_MIN_SHAPE: f64 = 1e4;

/// Largest relative distance `|x − a| / a` handled by the uniform expansion. Farther out
/// the series and continued fraction converge in about a hundred iterations.
pub(crate) const TEMME_MAX_DEVIATION: f64 = 0.3;

/// Taylor terms in η kept for every coefficient function c_k(η). The series
/// have radius 2√π, so at |η| ≤ 0.35 forty terms reach below 1e-40.
pub(crate) const TEMME_ETA_TERMS: usize = 40;

/// Highest order k of the expansion in `1/a`.
pub(crate) const TEMME_MAX_ORDER: usize = 14;

// ******** Seeds ***************************************************/

/// Acklam's inverse normal CDF approximation coefficients (central numerator).
pub(crate) const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (central denominator).
pub(crate) const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Acklam's inverse normal CDF approximation coefficients (tail numerator).
pub(crate) const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (tail denominator).
pub(crate) const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Breakpoint between Acklam's central and tail approximations (≈ 2σ).
pub(crate) const P_LOW: f64 = 0.02425;
