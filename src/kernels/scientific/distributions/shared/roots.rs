// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Quantile Root-Finder** - *Bracket-and-Refine Inversion of Cumulative Probabilities*
//!
//! One inversion routine shared by every distribution family, plus the small
//! one-dimensional search helpers the kernels use for modes and fitting.
//!
//! ## Inversion strategy
//! 1. Probabilities above ½ are mapped onto the complementary tail with `1 − p`, which is
//!    exact in binary floating point, so the solver always chases a target ≤ ½ on the
//!    side where the cumulative probability is small and precise.
//! 2. The residual is taken in log coordinates, `r(x) = ±(ln F(x) − ln p)`, oriented to be
//!    increasing in `x`. Targets far below epsilon keep full relative precision.
//! 3. A bracket is grown from the family's initial guess: geometrically toward a finite
//!    support boundary, by doubling steps toward an infinite one.
//! 4. Refinement takes Newton steps in the log coordinate (`dr/dx = pdf / F`) and falls
//!    back to bisection (geometric for brackets spanning orders of magnitude) whenever
//!    a step leaves the bracket or fails to halve the residual.

use crate::config::{SolverConfig, BRACKET_MAX_ITER};
use crate::errors::{KernelError, Result};
use crate::traits::distribution::{ContinuousDistribution, Interval};
use crate::traits::real::Real;

/// Rejects probabilities that are NaN or outside `[0, 1]`.
#[inline]
pub fn check_probability<T: Real>(p: T) -> Result<()> {
    if p.is_nan() || p < T::zero() || p > T::one() {
        return Err(KernelError::Domain(format!("probability {p} outside [0, 1]")));
    }
    Ok(())
}

/// Log-coordinate residual, increasing in `x`.
struct Residual<'d, T: Real, D: ContinuousDistribution<T> + ?Sized> {
    dist: &'d D,
    interval: Interval,
    ln_target: T,
}

impl<'d, T: Real, D: ContinuousDistribution<T> + ?Sized> Residual<'d, T, D> {
    /// `(r(x), F(x))`
    #[inline]
    fn eval(&self, x: T) -> (T, T) {
        let f = self.dist.cdf(x, self.interval);
        let r = f.ln() - self.ln_target;
        match self.interval {
            Interval::Lower => (r, f),
            Interval::Upper => (-r, f),
        }
    }
}

/// Picks a strictly interior starting point.
fn starting_point<T: Real>(lo: T, hi: T, guess: T) -> T {
    if guess.is_finite() && guess > lo && guess < hi {
        return guess;
    }
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => (lo + hi) * T::half(),
        (true, false) => lo + lo.abs().max(T::one()),
        (false, true) => hi - hi.abs().max(T::one()),
        (false, false) => T::zero(),
    }
}

/// Inverts `dist.cdf(·, interval)` at `p`.
///
/// `guess` seeds the bracket; any value is accepted and non-interior guesses are
/// replaced. `p = 0` and `p = 1` return the matching support boundary directly.
///
/// # Errors
/// `KernelError::Domain` when `p` is NaN or outside `[0, 1]`.
pub fn invert_cdf<T, D>(dist: &D, p: T, interval: Interval, guess: T, config: &SolverConfig<T>) -> Result<T>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
{
    check_probability(p)?;
    let support = dist.support();
    let (at_zero, at_one) = match interval {
        Interval::Lower => (support.min, support.max),
        Interval::Upper => (support.max, support.min),
    };
    if p == T::zero() {
        return Ok(at_zero);
    }
    if p == T::one() {
        return Ok(at_one);
    }

    let (target, interval) = if p > T::half() {
        (T::one() - p, interval.complement())
    } else {
        (p, interval)
    };
    let residual = Residual { dist, interval, ln_target: target.ln() };

    // ---------------- bracket ----------------
    // The support boundaries always bracket the root: r(min) < 0 < r(max).
    let mut lo = support.min;
    let mut hi = support.max;
    let mut x = starting_point(lo, hi, guess);
    let (mut r, mut f) = residual.eval(x);
    let mut step = x.abs().max(T::one());
    for _ in 0..BRACKET_MAX_ITER {
        if r == T::zero() {
            return Ok(x);
        }
        if r.is_nan() {
            tracing::debug!(p = %p, x = %x, "quantile residual undefined; returning last iterate");
            return Ok(x);
        }
        if r < T::zero() {
            lo = x;
        } else {
            hi = x;
        }
        let grow_right = r < T::zero() && hi == support.max;
        let grow_left = r > T::zero() && lo == support.min;
        if !grow_right && !grow_left {
            break;
        }
        let next = if grow_right {
            if support.max.is_finite() {
                x + (support.max - x) * T::half()
            } else {
                x + step
            }
        } else if support.min.is_finite() {
            support.min + (x - support.min) / T::lit(16.0)
        } else {
            x - step
        };
        step = step * T::two();
        if next == x || !next.is_finite() {
            break;
        }
        x = next;
        (r, f) = residual.eval(x);
    }

    // ---------------- refine ----------------
    let mut best_x = x;
    let mut best_r = r.abs();
    let mut force_bisect = false;

    for _ in 0..config.max_iter {
        if r.abs() <= config.tolerance {
            return Ok(x);
        }

        let pdf = dist.pdf(x);
        let newton = if !force_bisect && r.is_finite() && f > T::zero() && pdf > T::zero() && pdf.is_finite() {
            let candidate = x - r * f / pdf;
            (candidate.is_finite() && candidate > lo && candidate < hi).then_some(candidate)
        } else {
            None
        };
        let next = newton.unwrap_or_else(|| bisect_point(lo, hi));
        if !(next > lo && next < hi) || next == x {
            // bracket collapsed at the resolution of T
            return Ok(best_x);
        }

        let prev_r = r.abs();
        x = next;
        (r, f) = residual.eval(x);
        if r.is_nan() {
            return Ok(best_x);
        }
        if r < T::zero() {
            lo = x;
        } else if r > T::zero() {
            hi = x;
        } else {
            return Ok(x);
        }
        if r.abs() < best_r {
            best_r = r.abs();
            best_x = x;
        }
        force_bisect = newton.is_some() && r.abs() > prev_r * T::half();

        if hi - lo <= T::epsilon() * T::two() * lo.abs().max(hi.abs()) {
            return Ok(best_x);
        }
    }

    tracing::debug!(
        p = %p,
        x = %best_x,
        residual = %best_r,
        max_iter = config.max_iter,
        "quantile refinement cap reached; returning best iterate"
    );
    Ok(best_x)
}

/// Bisection point of `[lo, hi]`; geometric when the bracket spans orders of magnitude
/// on the positive axis, arithmetic otherwise.
#[inline]
fn bisect_point<T: Real>(lo: T, hi: T) -> T {
    let spread = T::lit(16.0);
    if lo > T::zero() && hi.is_finite() && hi > lo * spread {
        (lo * hi).sqrt()
    } else {
        lo + (hi - lo) * T::half()
    }
}

/// Root of a function with a sign change on `[lo, hi]` by plain bisection.
///
/// Returns the midpoint of the final bracket once it collapses at the precision of `T`
/// or after `max_iter` halvings.
pub fn bisect_root<T: Real>(mut f: impl FnMut(T) -> T, mut lo: T, mut hi: T, max_iter: usize) -> T {
    let mut f_lo = f(lo);
    for _ in 0..max_iter {
        let mid = lo + (hi - lo) * T::half();
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = f(mid);
        if f_mid == T::zero() {
            return mid;
        }
        if (f_mid < T::zero()) == (f_lo < T::zero()) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    lo + (hi - lo) * T::half()
}

/// Minimum of a unimodal function on `[a, b]` by golden-section search.
///
/// Returns `(x, f(x), converged)`; `converged` is false when `max_iter` was reached
/// before the bracket shrank below `tolerance · (1 + |x|)`.
pub fn golden_section_min<T: Real>(
    mut f: impl FnMut(T) -> T,
    mut a: T,
    mut b: T,
    tolerance: T,
    max_iter: usize,
) -> (T, T, bool) {
    let inv_phi = (T::lit(5.0).sqrt() - T::one()) * T::half();
    let mut c = b - (b - a) * inv_phi;
    let mut d = a + (b - a) * inv_phi;
    let mut fc = f(c);
    let mut fd = f(d);
    for _ in 0..max_iter {
        let mid = (a + b) * T::half();
        if (b - a).abs() <= tolerance * (T::one() + mid.abs()) {
            return if fc <= fd { (c, fc, true) } else { (d, fd, true) };
        }
        // NaN objective values compare false and shrink toward the other side
        if fc <= fd || fd.is_nan() {
            b = d;
            d = c;
            fd = fc;
            c = b - (b - a) * inv_phi;
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + (b - a) * inv_phi;
            fd = f(d);
        }
    }
    if fc <= fd {
        (c, fc, false)
    } else {
        (d, fd, false)
    }
}

#[cfg(test)]
mod roots_tests {
    use super::*;
    use crate::traits::distribution::Support;

    /// Unit exponential, a closed-form reference for the solver.
    struct Exp;

    impl ContinuousDistribution<f64> for Exp {
        fn pdf(&self, x: f64) -> f64 {
            if x < 0.0 { 0.0 } else { (-x).exp() }
        }
        fn cdf(&self, x: f64, interval: Interval) -> f64 {
            let x = x.max(0.0);
            match interval {
                Interval::Lower => -(-x).exp_m1(),
                Interval::Upper => (-x).exp(),
            }
        }
        fn quantile(&self, p: f64, interval: Interval) -> Result<f64> {
            invert_cdf(self, p, interval, 1.0, &SolverConfig::default())
        }
        fn support(&self) -> Support<f64> {
            Support::new(0.0, f64::INFINITY)
        }
        fn mean(&self) -> f64 { 1.0 }
        fn median(&self) -> f64 { std::f64::consts::LN_2 }
        fn mode(&self) -> f64 { 0.0 }
        fn variance(&self) -> f64 { 1.0 }
        fn skewness(&self) -> f64 { 2.0 }
        fn kurtosis(&self) -> f64 { 6.0 }
        fn entropy(&self) -> f64 { 1.0 }
    }

    fn assert_rel(a: f64, b: f64, tol: f64) {
        assert!(((a - b) / b).abs() <= tol, "relative mismatch: {} vs {} (tol={})", a, b, tol);
    }

    #[test]
    fn inverts_both_tails() {
        let d = Exp;
        assert_rel(d.quantile(0.3, Interval::Lower).unwrap(), -(0.7f64).ln(), 1e-13);
        assert_rel(d.quantile(0.3, Interval::Upper).unwrap(), -(0.3f64).ln(), 1e-13);
        assert_rel(d.quantile(0.9, Interval::Lower).unwrap(), -(0.1f64).ln(), 1e-13);
    }

    #[test]
    fn extreme_targets_keep_relative_precision() {
        let d = Exp;
        // lower tail: x ≈ p for tiny p
        assert_rel(d.quantile(1e-200, Interval::Lower).unwrap(), 1e-200, 1e-12);
        assert_rel(d.quantile(1e-300, Interval::Upper).unwrap(), 300.0 * std::f64::consts::LN_10, 1e-13);
    }

    #[test]
    fn boundaries_and_domain() {
        let d = Exp;
        assert_eq!(d.quantile(0.0, Interval::Lower).unwrap(), 0.0);
        assert_eq!(d.quantile(1.0, Interval::Lower).unwrap(), f64::INFINITY);
        assert_eq!(d.quantile(0.0, Interval::Upper).unwrap(), f64::INFINITY);
        assert_eq!(d.quantile(1.0, Interval::Upper).unwrap(), 0.0);
        assert!(matches!(d.quantile(f64::NAN, Interval::Lower), Err(KernelError::Domain(_))));
        assert!(matches!(d.quantile(-0.1, Interval::Lower), Err(KernelError::Domain(_))));
        assert!(matches!(d.quantile(1.5, Interval::Upper), Err(KernelError::Domain(_))));
    }

    #[test]
    fn bisection_and_golden_section() {
        let r = bisect_root(|x: f64| x * x - 2.0, 0.0, 2.0, 200);
        assert_rel(r, std::f64::consts::SQRT_2, 1e-15);
        let (x, fx, ok) = golden_section_min(|x: f64| (x - 0.25).powi(2) + 1.0, -3.0, 3.0, 1e-10, 500);
        assert!(ok);
        assert!((x - 0.25).abs() < 1e-8);
        assert!((fx - 1.0).abs() < 1e-15);
    }
}
