// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **ARGUS Distribution** - *Invariant-Mass Spectra Near a Kinematic Endpoint*
//!
//! The ARGUS distribution with curvature `χ = alpha` and cutoff 1, describing a
//! background spectrum that vanishes at the kinematic limit.
//!
//! ### Parameters
//! - **`alpha` (curvature χ)**: `alpha > 0`, finite
//!
//! ### Formulae
//! With `s = α²/2`, `u = 1 − x²` and `Ψ(α) = P(3/2, s)/2`:
//! - **PDF**: `α³ / (√(2π) Ψ(α)) · x √u · e^{−s u}`
//! - **Upper tail**: `P(3/2, s u) / P(3/2, s)`
//! - **Raw moments**: `E[Xᵏ] = B(3/2, k/2+1) M(k/2+1, k/2+5/2, s) / (B(3/2, 1) M(1, 5/2, s))`
//! - **Mode**: `√((α² − 2) + √(α⁴ + 4)) / (√2 α)`
//! - **Support**: `[0, 1]`, density zero at both ends

use crate::config::{IntegrationConfig, SolverConfig};
use crate::errors::{log_invalid_parameter, KernelError, Result};
use crate::kernels::scientific::distributions::shared::fit::{fit_by_quantiles, FitResult};
use crate::kernels::scientific::distributions::shared::roots::invert_cdf;
use crate::kernels::scientific::distributions::shared::scalar::{
    bessel_i_scaled, half_ln_two_pi, ln_beta, ln_hyp1f1, reg_lower_gamma, reg_upper_gamma,
};
use crate::kernels::scientific::quadrature::integrate;
use crate::traits::distribution::{ContinuousDistribution, Interval, Support};
use crate::traits::real::Real;

/// Search range of `ln α` for fitting.
const FIT_LN_ALPHA: (f64, f64) = (-4.6, 4.6);

/// Below this `x` the lower tail is integrated from the density rather than taken as a
/// difference of incomplete gamma functions.
const LOWER_TAIL_QUADRATURE: f64 = 0.5;

/// ARGUS distribution with curvature `alpha` on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argus<T: Real> {
    alpha: T,
    /// `α²/2`
    s: T,
    /// `P(3/2, s)`
    p_s: T,
    /// `Q(3/2, s)`
    q_s: T,
    /// `ln(α³ / (√(2π) Ψ(α)))`
    ln_norm: T,
}

impl<T: Real> Argus<T> {
    /// # Errors
    /// `KernelError::InvalidParameters` unless `alpha` is finite and positive.
    pub fn new(alpha: T) -> Result<Self> {
        if !(alpha.is_finite() && alpha > T::zero()) {
            return Err(KernelError::InvalidParameters(log_invalid_parameter(
                "Argus",
                "alpha",
                alpha,
                "0 < alpha < inf",
            )));
        }
        let a32 = T::ratio(3.0, 2.0);
        let s = alpha * alpha * T::half();
        let p_s = reg_lower_gamma(a32, s);
        let q_s = reg_upper_gamma(a32, s);
        let ln_norm = T::lit(3.0) * alpha.ln() - half_ln_two_pi::<T>() - (p_s * T::half()).ln();
        Ok(Self { alpha, s, p_s, q_s, ln_norm })
    }

    #[inline]
    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// Fits `alpha` by quantile matching over the probability window.
    ///
    /// # Errors
    /// `KernelError::Domain` for a window outside `0 <= lo < hi <= 1`.
    pub fn fit(data: &[f64], window: (f64, f64)) -> Result<FitResult<T, Self>> {
        let search = (T::lit(FIT_LN_ALPHA.0), T::lit(FIT_LN_ALPHA.1));
        fit_by_quantiles(data, window, search, Self::new)
    }

    /// `E[Xᵏ]`
    pub fn raw_moment(&self, k: usize) -> T {
        let a32 = T::ratio(3.0, 2.0);
        let h = T::from_usize(k) * T::half();
        let ln_m = ln_beta(a32, h + T::one()) - ln_beta(a32, T::one())
            + ln_hyp1f1(h + T::one(), h + T::ratio(5.0, 2.0), self.s)
            - ln_hyp1f1(T::one(), T::ratio(5.0, 2.0), self.s);
        ln_m.exp()
    }

    /// Central moments `(μ₂, μ₃, μ₄)` from the raw moments.
    fn central_moments(&self) -> (T, T, T) {
        let m1 = self.mean();
        let m2 = self.raw_moment(2);
        let m3 = self.raw_moment(3);
        let m4 = self.raw_moment(4);
        let three = T::lit(3.0);
        let mu2 = m2 - m1 * m1;
        let mu3 = m3 - three * m1 * m2 + T::two() * m1 * m1 * m1;
        let mu4 = m4 - T::lit(4.0) * m1 * m3 + T::lit(6.0) * m1 * m1 * m2 - three * m1.powi(4);
        (mu2, mu3, mu4)
    }

    /// `1 − x²` without cancellation near 1.
    #[inline(always)]
    fn one_minus_sq(x: T) -> T {
        (T::one() - x) * (T::one() + x)
    }

    fn lower_tail(&self, x: T) -> T {
        if x < T::lit(LOWER_TAIL_QUADRATURE) {
            return integrate(|y| self.pdf(y), T::zero(), x, &[], &IntegrationConfig::default());
        }
        let a32 = T::ratio(3.0, 2.0);
        let su = self.s * Self::one_minus_sq(x);
        let p_su = reg_lower_gamma(a32, su);
        let diff = if p_su > T::half() {
            reg_upper_gamma(a32, su) - self.q_s
        } else {
            self.p_s - p_su
        };
        (diff / self.p_s).max(T::zero()).min(T::one())
    }

    /// Seeds from the local behaviour at each end of the support: the density grows
    /// like `x` at 0 and like `√(1 − x)` at 1.
    fn quantile_seed(&self, p: T, interval: Interval) -> T {
        let (lower_p, upper_p) = match interval {
            Interval::Lower => (p, T::one() - p),
            Interval::Upper => (T::one() - p, p),
        };
        let small = T::lit(0.1);
        if lower_p < small {
            // F ≈ c x² / 2, c = e^{ln_norm − s}
            let c = (self.ln_norm - self.s).exp();
            (T::two() * lower_p / c).sqrt()
        } else if upper_p < small {
            // 1 − F ≈ (2√2/3) k (1 − x)^{3/2}, k = e^{ln_norm}
            let k = self.ln_norm.exp();
            let w = T::lit(3.0) * upper_p / (T::two() * T::SQRT_2() * k);
            T::one() - w.powf(T::ratio(2.0, 3.0))
        } else {
            self.mode()
        }
    }
}

impl<T: Real> ContinuousDistribution<T> for Argus<T> {
    fn pdf(&self, x: T) -> T {
        if x.is_nan() {
            return T::nan();
        }
        if x <= T::zero() || x >= T::one() {
            return T::zero();
        }
        let u = Self::one_minus_sq(x);
        (self.ln_norm + x.ln() + T::half() * u.ln() - self.s * u).exp()
    }

    fn cdf(&self, x: T, interval: Interval) -> T {
        if x.is_nan() {
            return T::nan();
        }
        let lower = if x <= T::zero() {
            T::zero()
        } else if x >= T::one() {
            T::one()
        } else {
            return match interval {
                Interval::Lower => self.lower_tail(x),
                Interval::Upper => {
                    reg_lower_gamma(T::ratio(3.0, 2.0), self.s * Self::one_minus_sq(x)) / self.p_s
                }
            };
        };
        match interval {
            Interval::Lower => lower,
            Interval::Upper => T::one() - lower,
        }
    }

    fn quantile(&self, p: T, interval: Interval) -> Result<T> {
        let seed = if p > T::zero() && p < T::one() {
            self.quantile_seed(p, interval)
        } else {
            T::nan()
        };
        invert_cdf(self, p, interval, seed, &SolverConfig::default())
    }

    fn support(&self) -> Support<T> {
        Support::new(T::zero(), T::one())
    }

    /// `√(π/8) α e^{−α²/4} I₁(α²/4) / Ψ(α)`
    fn mean(&self) -> T {
        let quarter = self.s * T::half();
        (T::PI() / T::lit(8.0)).sqrt() * self.alpha * bessel_i_scaled(T::one(), quarter)
            / (self.p_s * T::half())
    }

    fn median(&self) -> T {
        self.quantile(T::half(), Interval::Lower).unwrap_or_else(|_| T::nan())
    }

    fn mode(&self) -> T {
        let a2 = self.alpha * self.alpha;
        let two = T::two();
        let root = (a2 * a2 + T::lit(4.0)).sqrt();
        if a2 < two {
            // rationalised to avoid cancelling (α² − 2) against √(α⁴ + 4)
            (two / (root + two - a2)).sqrt()
        } else {
            ((a2 - two) + root).sqrt() / (T::SQRT_2() * self.alpha)
        }
    }

    fn variance(&self) -> T {
        self.central_moments().0
    }

    fn skewness(&self) -> T {
        let (mu2, mu3, _) = self.central_moments();
        mu3 / mu2.powf(T::ratio(3.0, 2.0))
    }

    fn kurtosis(&self) -> T {
        let (mu2, _, mu4) = self.central_moments();
        mu4 / (mu2 * mu2) - T::lit(3.0)
    }

    /// No closed form.
    fn entropy(&self) -> T {
        T::nan()
    }
}
