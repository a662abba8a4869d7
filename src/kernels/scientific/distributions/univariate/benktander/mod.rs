// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Benktander Type I Distribution** - *Heavy-Tailed Loss Severities*
//!
//! Benktander type I distribution on `[1, ∞)`, a reinsurance loss model whose tail sits
//! between the Pareto and the lognormal.
//!
//! ### Parameters
//! - **`alpha`**: `alpha > 0`
//! - **`beta`**: `0 < beta <= alpha (alpha + 1) / 2`; beyond this bound the density
//!   turns negative near `x = 1`
//!
//! ### Formulae
//! With `t = ln x` and `c = 2β/α`:
//! - **Upper tail**: `(1 + c t) e^{−(α+1) t − β t²}`
//! - **PDF**: `[(1 + c t)(1 + α + 2β t) − c] x^{−(2 + α + β t)}`
//! - **Raw moments**: `E[Xⁿ] = 1 + n/α + n(n−1) J(α + 1 − n) / α`, with
//!   `J(c) = ½ √(π/β) erfcx(c / (2√β))`

use crate::config::{IntegrationConfig, SolverConfig, BRACKET_MAX_ITER, SOLVER_MAX_ITER};
use crate::errors::{log_invalid_parameter, KernelError, Result};
use crate::kernels::scientific::distributions::shared::roots::{bisect_root, invert_cdf};
use crate::kernels::scientific::erf::erfcx;
use crate::kernels::scientific::quadrature::integrate;
use crate::traits::distribution::{ContinuousDistribution, Interval, Support};
use crate::traits::real::Real;

/// Below this `t = ln x` the lower tail is integrated from the density; at the
/// `beta` bound the closed form cancels to first order in `t`.
const LOWER_TAIL_QUADRATURE: f64 = 0.25;

/// Benktander type I distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benktander<T: Real> {
    alpha: T,
    beta: T,
    /// `2β/α`
    c: T,
    /// Density bracket `A(t) = a₀ + a₁ t + a₂ t²`.
    a0: T,
    a1: T,
    a2: T,
}

impl<T: Real> Benktander<T> {
    /// # Errors
    /// `KernelError::InvalidParameters` unless both parameters are finite, positive,
    /// and `beta <= alpha (alpha + 1) / 2`.
    pub fn new(alpha: T, beta: T) -> Result<Self> {
        if !(alpha.is_finite() && alpha > T::zero()) {
            return Err(KernelError::InvalidParameters(log_invalid_parameter(
                "Benktander",
                "alpha",
                alpha,
                "0 < alpha < inf",
            )));
        }
        let bound = alpha * (alpha + T::one()) * T::half();
        if !(beta.is_finite() && beta > T::zero() && beta <= bound) {
            return Err(KernelError::InvalidParameters(log_invalid_parameter(
                "Benktander",
                "beta",
                beta,
                "0 < beta <= alpha (alpha + 1) / 2",
            )));
        }
        let c = T::two() * beta / alpha;
        let a0 = T::one() + alpha - c;
        let a1 = c * (T::one() + alpha) + T::two() * beta;
        let a2 = T::two() * beta * c;
        Ok(Self { alpha, beta, c, a0, a1, a2 })
    }

    #[inline]
    pub fn alpha(&self) -> T {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> T {
        self.beta
    }

    /// `J(c) = ∫₀^∞ e^{−c t − β t²} dt`
    fn j(&self, c: T) -> T {
        let sqrt_beta = self.beta.sqrt();
        T::half() * (T::PI() / self.beta).sqrt() * erfcx(c / (T::two() * sqrt_beta))
    }

    /// `E[Xⁿ]`
    pub fn raw_moment(&self, n: usize) -> T {
        let nf = T::from_usize(n);
        let a = self.alpha;
        let mut m = T::one() + nf / a;
        if n >= 2 {
            m = m + nf * (nf - T::one()) * self.j(a + T::one() - nf) / a;
        }
        m
    }

    /// `A(t) = (1 + c t)(1 + α + 2β t) − c`, expanded so the constant term is exact.
    #[inline(always)]
    fn bracket(&self, t: T) -> T {
        self.a0 + t * (self.a1 + self.a2 * t)
    }

    /// Sign of the log-density slope in `t`: `A′(t) − A(t)(2 + α + 2β t)`.
    fn slope(&self, t: T) -> T {
        let a_prime = self.a1 + T::two() * self.a2 * t;
        a_prime - self.bracket(t) * (T::two() + self.alpha + T::two() * self.beta * t)
    }

    /// `(u, e^{−u})` with `u = (α + 1) t + β t²`.
    #[inline(always)]
    fn decay(&self, t: T) -> (T, T) {
        let u = (self.alpha + T::one()) * t + self.beta * t * t;
        (u, (-u).exp())
    }

    fn lower_tail(&self, x: T, t: T) -> T {
        if t < T::lit(LOWER_TAIL_QUADRATURE) {
            return integrate(|y| self.pdf(y), T::one(), x, &[], &IntegrationConfig::default());
        }
        let (u, e) = self.decay(t);
        (-(-u).exp_m1() - self.c * t * e).max(T::zero()).min(T::one())
    }

    /// Linear growth from the density at 1 for small lower targets, the dominant
    /// `(α + 1) t + β t²` exponent for the rest.
    fn quantile_seed(&self, p: T, interval: Interval) -> T {
        let (lower_p, upper_p) = match interval {
            Interval::Lower => (p, T::one() - p),
            Interval::Upper => (T::one() - p, p),
        };
        let f1 = self.pdf(T::one());
        if lower_p < T::lit(0.1) && f1 > T::zero() {
            return T::one() + lower_p / f1;
        }
        let b = self.alpha + T::one();
        let disc = b * b - T::lit(4.0) * self.beta * upper_p.ln();
        ((disc.sqrt() - b) / (T::two() * self.beta)).exp()
    }
}

impl<T: Real> ContinuousDistribution<T> for Benktander<T> {
    fn pdf(&self, x: T) -> T {
        if x.is_nan() {
            return T::nan();
        }
        if x < T::one() || x.is_infinite() {
            return T::zero();
        }
        let t = x.ln();
        let a = self.bracket(t).max(T::zero());
        a * (-(T::two() + self.alpha + self.beta * t) * t).exp()
    }

    fn cdf(&self, x: T, interval: Interval) -> T {
        if x.is_nan() {
            return T::nan();
        }
        let lower = if x <= T::one() {
            T::zero()
        } else if x.is_infinite() {
            T::one()
        } else {
            let t = x.ln();
            return match interval {
                Interval::Lower => self.lower_tail(x, t),
                Interval::Upper => ((T::one() + self.c * t) * self.decay(t).1).min(T::one()),
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
        Support::new(T::one(), T::infinity())
    }

    fn mean(&self) -> T {
        T::one() + self.alpha.recip()
    }

    fn median(&self) -> T {
        self.quantile(T::half(), Interval::Lower).unwrap_or_else(|_| T::nan())
    }

    /// 1 when the density falls from `x = 1`, otherwise the slope root by bisection.
    fn mode(&self) -> T {
        if self.slope(T::zero()) <= T::zero() {
            return T::one();
        }
        let mut hi = T::one();
        for _ in 0..BRACKET_MAX_ITER {
            if self.slope(hi) < T::zero() {
                break;
            }
            hi = hi * T::two();
        }
        bisect_root(|t| self.slope(t), T::zero(), hi, SOLVER_MAX_ITER).exp()
    }

    /// `(2 J(α − 1) − 1/α) / α`
    fn variance(&self) -> T {
        let a = self.alpha;
        (T::two() * self.j(a - T::one()) - a.recip()) / a
    }

    fn skewness(&self) -> T {
        let m1 = self.mean();
        let m2 = self.raw_moment(2);
        let m3 = self.raw_moment(3);
        let mu2 = self.variance();
        let mu3 = m3 - T::lit(3.0) * m1 * m2 + T::two() * m1 * m1 * m1;
        mu3 / mu2.powf(T::ratio(3.0, 2.0))
    }

    fn kurtosis(&self) -> T {
        let m1 = self.mean();
        let m2 = self.raw_moment(2);
        let m3 = self.raw_moment(3);
        let m4 = self.raw_moment(4);
        let mu2 = self.variance();
        let mu4 = m4 - T::lit(4.0) * m1 * m3 + T::lit(6.0) * m1 * m1 * m2 - T::lit(3.0) * m1.powi(4);
        mu4 / (mu2 * mu2) - T::lit(3.0)
    }

    /// No closed form.
    fn entropy(&self) -> T {
        T::nan()
    }
}

#[cfg(test)]
mod benktander_tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() <= tol * b.abs().max(1e-300),
            "assert_close failed: {a} vs {b} (rel tol={tol})"
        );
    }

    #[test]
    fn parameter_region() {
        assert!(Benktander::new(2.0_f64, 3.0).is_ok());
        assert!(Benktander::new(0.5_f64, 0.375).is_ok());
        assert!(matches!(Benktander::new(2.0_f64, 3.5), Err(KernelError::InvalidParameters(_))));
        assert!(matches!(Benktander::new(0.0_f64, 0.1), Err(KernelError::InvalidParameters(_))));
        assert!(matches!(Benktander::new(1.0_f64, 0.0), Err(KernelError::InvalidParameters(_))));
        assert!(matches!(Benktander::new(f64::NAN, 0.1), Err(KernelError::InvalidParameters(_))));
        assert!(matches!(Benktander::new(1.0_f64, f64::INFINITY), Err(KernelError::InvalidParameters(_))));
    }

    #[test]
    fn density_and_tails_reference() {
        let d = Benktander::new(2.0_f64, 1.0).unwrap();
        assert_close(d.pdf(1.2), 1.3892371817952653, 1e-13);
        assert_close(d.pdf(2.5), 0.091332311665101309, 1e-13);
        assert_close(d.cdf(1.2, Interval::Lower), 0.33815632658059247, 1e-13);
        assert_close(d.cdf(2.5, Interval::Upper), 0.052967884923443189, 1e-13);
        assert_close(d.cdf(10.0, Interval::Upper), 1.6453902643208944e-5, 1e-12);
        assert_close(d.cdf(1000.0, Interval::Upper), 1.495503327955845e-29, 1e-11);
        assert_close(d.pdf(1000.0), 2.4958533436063322e-31, 1e-11);
    }

    #[test]
    fn support_boundary() {
        let d = Benktander::new(1.5_f64, 0.5).unwrap();
        assert_eq!(d.pdf(0.5), 0.0);
        assert_close(d.pdf(1.0), 2.5 - 2.0 / 3.0, 1e-15);
        assert_eq!(d.cdf(1.0, Interval::Lower), 0.0);
        assert_eq!(d.cdf(1.0, Interval::Upper), 1.0);
        assert_eq!(d.cdf(f64::INFINITY, Interval::Lower), 1.0);
        assert_eq!(d.pdf(f64::INFINITY), 0.0);
        assert_eq!(d.quantile(0.0, Interval::Lower).unwrap(), 1.0);
        assert_eq!(d.quantile(0.0, Interval::Upper).unwrap(), f64::INFINITY);
    }

    #[test]
    fn raw_moments() {
        let d = Benktander::new(2.0_f64, 1.0).unwrap();
        let expect = [1.5, 2.545641360765047, 5.158680776358274, 13.381406602222201];
        for (n, &e) in expect.iter().enumerate() {
            assert_close(d.raw_moment(n + 1), e, 1e-13);
        }
        let d = Benktander::new(1.5_f64, 0.5).unwrap();
        let expect = [1.6666666666666667, 3.5018192752715898, 10.856069981431975, 61.307810724864894];
        for (n, &e) in expect.iter().enumerate() {
            assert_close(d.raw_moment(n + 1), e, 1e-13);
        }
    }

    #[test]
    fn central_moments() {
        let d = Benktander::new(2.0_f64, 1.0).unwrap();
        assert_close(d.mean(), 1.5, 1e-15);
        assert_close(d.variance(), 0.29564136076504704, 1e-13);
        assert_close(d.skewness(), 2.8198941546592521, 1e-11);
        assert_close(d.kurtosis(), 15.397141237029879, 1e-10);
        assert!(d.entropy().is_nan());
    }

    #[test]
    fn mode_at_boundary_or_interior() {
        assert_eq!(Benktander::new(2.0_f64, 1.0).unwrap().mode(), 1.0);
        let d = Benktander::new(0.5_f64, 0.375).unwrap();
        assert_close(d.mode(), 1.4973559463836739, 1e-12);
        assert_eq!(d.pdf(1.0), 0.0);
    }

    #[test]
    fn median_reference() {
        assert_close(Benktander::new(2.0_f64, 1.0).unwrap().median(), 1.3334208706187457, 1e-12);
        assert_close(Benktander::new(3.0_f64, 0.2).unwrap().median(), 1.1942998463689288, 1e-12);
    }
}
