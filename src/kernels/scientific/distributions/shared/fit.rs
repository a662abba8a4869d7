// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Parameter Fitting** - *Quantile-Matching Estimation of a Shape Parameter*
//!
//! Fits a one-parameter family to data by matching cumulative probabilities at the
//! empirical quantiles of a probability window.
//!
//! ## Procedure
//! 1. Validate the window `0 <= lo < hi <= 1`.
//! 2. Discard non-finite samples; too few survivors yields an empty result, not an error.
//! 3. Evaluate empirical quantiles `q̂ᵢ` on an even grid `pᵢ` across the window, with
//!    linear interpolation between order statistics.
//! 4. Minimise the mean absolute probability residual `|F_θ(q̂ᵢ) − pᵢ|` over `ln θ`:
//!    a coarse scan of the search range localises the minimum, golden-section search
//!    refines it.

use crate::config::{FIT_GRID_POINTS, FIT_MAX_ITER, FIT_MIN_SAMPLES, FIT_SCAN_POINTS};
use crate::errors::{KernelError, Result};
use crate::kernels::scientific::distributions::shared::roots::golden_section_min;
use crate::traits::distribution::{ContinuousDistribution, Interval};
use crate::traits::real::Real;

/// Outcome of a fit.
///
/// `distribution` is `None` when no fit could be produced (too little data, or the
/// search did not converge). `error` is the mean absolute probability residual of the
/// returned fit, or of the best candidate seen, NaN if nothing was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult<T: Real, D> {
    pub distribution: Option<D>,
    pub error: T,
}

impl<T: Real, D> FitResult<T, D> {
    fn empty() -> Self {
        FitResult { distribution: None, error: T::nan() }
    }

    pub fn is_fitted(&self) -> bool {
        self.distribution.is_some()
    }
}

/// Validates a probability window.
pub fn check_window(window: (f64, f64)) -> Result<()> {
    let (lo, hi) = window;
    if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && hi <= 1.0 && lo < hi) {
        return Err(KernelError::Domain(format!(
            "fit window ({lo}, {hi}) must satisfy 0 <= lo < hi <= 1"
        )));
    }
    Ok(())
}

/// Sorted finite samples.
pub fn finite_sorted(data: &[f64]) -> Vec<f64> {
    let mut xs: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    xs.sort_by(f64::total_cmp);
    xs
}

/// Empirical quantile of sorted data by linear interpolation between order statistics.
pub fn empirical_quantile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let i = (h.floor() as usize).min(n - 2);
            let frac = h - i as f64;
            sorted[i] + frac * (sorted[i + 1] - sorted[i])
        }
    }
}

/// Fits the one-parameter family produced by `build` to `data`.
///
/// `search` bounds `ln θ`. `build` may reject a candidate θ; rejected candidates score
/// `+∞`.
///
/// # Errors
/// `KernelError::Domain` for an invalid window.
pub fn fit_by_quantiles<T, D, B>(data: &[f64], window: (f64, f64), search: (T, T), build: B) -> Result<FitResult<T, D>>
where
    T: Real,
    D: ContinuousDistribution<T>,
    B: Fn(T) -> Result<D>,
{
    check_window(window)?;
    let sorted = finite_sorted(data);
    if sorted.len() < FIT_MIN_SAMPLES {
        return Ok(FitResult::empty());
    }

    let (lo, hi) = window;
    let grid: Vec<(T, T)> = (0..FIT_GRID_POINTS)
        .map(|i| {
            let p = lo + (hi - lo) * i as f64 / (FIT_GRID_POINTS - 1) as f64;
            (T::lit(empirical_quantile(&sorted, p)), T::lit(p))
        })
        .collect();

    let objective = |ln_theta: T| -> T {
        match build(ln_theta.exp()) {
            Ok(dist) => {
                let total = grid.iter().fold(T::zero(), |acc, &(q, p)| {
                    acc + (dist.cdf(q, Interval::Lower) - p).abs()
                });
                let err = total / T::from_usize(grid.len());
                if err.is_nan() {
                    T::infinity()
                } else {
                    err
                }
            }
            Err(_) => T::infinity(),
        }
    };

    // coarse scan
    let (s_lo, s_hi) = search;
    let step = (s_hi - s_lo) / T::from_usize(FIT_SCAN_POINTS - 1);
    let mut best_k = 0usize;
    let mut best_err = T::infinity();
    for k in 0..FIT_SCAN_POINTS {
        let e = objective(s_lo + step * T::from_usize(k));
        if e < best_err {
            best_err = e;
            best_k = k;
        }
    }
    if !best_err.is_finite() {
        return Ok(FitResult { distribution: None, error: best_err });
    }

    // refine
    let a = s_lo + step * T::from_usize(best_k.saturating_sub(1));
    let b = s_lo + step * T::from_usize((best_k + 1).min(FIT_SCAN_POINTS - 1));
    let (ln_theta, err, converged) = golden_section_min(&objective, a, b, T::epsilon().sqrt(), FIT_MAX_ITER);
    if !converged || !err.is_finite() {
        tracing::debug!(error = %err, "fit search did not converge");
        return Ok(FitResult { distribution: None, error: err.min(best_err) });
    }
    let distribution = build(ln_theta.exp()).ok();
    tracing::debug!(theta = %ln_theta.exp(), error = %err, "fit converged");
    Ok(FitResult { distribution, error: err })
}
