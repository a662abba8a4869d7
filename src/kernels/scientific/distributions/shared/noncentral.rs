// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Noncentral Sums** - *Poisson-Weighted Mixtures of Central Kernels*
//!
//! Noncentral families are Poisson mixtures of their central counterparts:
//!
//! ```text
//! G(x) = Σⱼ wⱼ · g_j(x),     wⱼ = e^{−m} mʲ / j!
//! ```
//!
//! The sum starts at the Poisson mode `j₀ = ⌊m⌋`, where the weights peak, and walks
//! outward in both directions. Each direction stops once a contribution is both below
//! `ε · total` and shrinking, so the number of terms scales with `√m` rather than `m`.
//! A running total of zero never counts as converged: when the kernel underflows around
//! the Poisson mode the walk continues until it reaches terms that register, or the
//! weights themselves underflow.
//!
//! When the significant range of the weights, about `(√(−2 ln ε) + 2) · √m` terms on each
//! side, exceeds [`NONCENTRAL_MAX_TERMS`], the walk visits every `s`-th index, `s` a power
//! of two, and weights each visited term by `s`. The weights and the central kernels are
//! smooth in `j` on the scale of the Poisson width, so this trapezoidal sum keeps full
//! precision while the term count stays bounded for any finite `m`. The index is carried
//! in `T`, never in a machine integer.

use crate::config::NONCENTRAL_MAX_TERMS;
use crate::kernels::scientific::distributions::shared::scalar::ln_gamma_prefactor;
use crate::traits::real::Real;

/// `Σⱼ Poisson(j; m) · term(j)` for finite `m >= 0`; `term` receives the index `j` as a
/// whole-valued scalar.
///
/// `term` must be finite and non-negative. Failing to settle within
/// [`NONCENTRAL_MAX_TERMS`] steps in either direction emits a `tracing::warn!` and
/// returns the partial sum. NaN, negative or infinite `m` → NaN.
pub fn poisson_weighted_sum<T: Real>(m: T, mut term: impl FnMut(T) -> T) -> T {
    if m.is_nan() || m < T::zero() || m.is_infinite() {
        return T::nan();
    }
    if m == T::zero() {
        return term(T::zero());
    }

    let j0 = m.floor();
    let reach = ((-T::two() * T::epsilon().ln()).sqrt() + T::two()) * m.sqrt();
    let budget = T::from_usize(NONCENTRAL_MAX_TERMS);
    // power-of-two strides keep every visited index exact in T
    let stride = if reach > budget { (reach / budget).log2().ceil().exp2() } else { T::one() };
    if j0 + stride == j0 {
        // the whole Poisson mass sits inside one representable step of T
        return term(j0);
    }

    let first = poisson_weight(m, j0) * stride * term(j0);
    let mut total = first;
    if !walk(m, j0, stride, first, &mut total, &mut term) && total > T::zero() {
        noncentral_cap(m, stride, "forward");
    }
    if !walk(m, j0, -stride, first, &mut total, &mut term) && total > T::zero() {
        noncentral_cap(m, stride, "backward");
    }
    total
}

/// e^{−m} mʲ / j! = m^{j+1} e^{−m} / Γ(j+1) / m
#[inline]
fn poisson_weight<T: Real>(m: T, j: T) -> T {
    (ln_gamma_prefactor(j + T::one(), m) - m.ln()).exp()
}

/// Adds contributions from `j0 + step` onward to `total`. Returns `false` if the
/// contributions had not settled after [`NONCENTRAL_MAX_TERMS`] steps.
///
/// Unit steps update the weight by its ratio recurrence; wider strides evaluate each
/// weight directly and scale it by the stride.
fn walk<T: Real>(
    m: T,
    j0: T,
    step: T,
    first: T,
    total: &mut T,
    term: &mut impl FnMut(T) -> T,
) -> bool {
    let unit = step.abs() == T::one();
    let width = step.abs();
    let tol = T::epsilon();
    let mut w = if unit { poisson_weight(m, j0) } else { T::zero() };
    let mut j = j0;
    let mut prev = first;
    for _ in 0..NONCENTRAL_MAX_TERMS {
        let next = j + step;
        if next < T::zero() {
            return true;
        }
        w = if !unit {
            poisson_weight(m, next) * width
        } else if step > T::zero() {
            // w_{j+1} = w_j · m / (j + 1)
            w * m / next
        } else {
            // w_{j−1} = w_j · j / m
            w * j / m
        };
        j = next;
        let c = w * term(j);
        *total = *total + c;
        if settled(c, prev, *total, tol) || w == T::zero() {
            return true;
        }
        prev = c;
    }
    false
}

#[inline(always)]
fn settled<T: Real>(c: T, prev: T, total: T, tol: T) -> bool {
    total > T::zero() && c <= tol * total && c <= prev
}

#[cold]
fn noncentral_cap<T: Real>(m: T, stride: T, direction: &'static str) {
    tracing::warn!(
        poisson_mean = %m,
        stride = %stride,
        direction = direction,
        max_terms = NONCENTRAL_MAX_TERMS,
        "noncentral series truncated at term cap; precision may be reduced"
    );
}
