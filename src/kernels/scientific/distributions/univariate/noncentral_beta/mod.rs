// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Noncentral Beta Distribution** - *Power Analysis for F and Beta Tests*
//!
//! Type I noncentral beta distribution, the Poisson mixture
//!
//! ```text
//! f(x) = Σⱼ wⱼ Beta(α + j, β).pdf(x),     wⱼ = e^{−λ/2} (λ/2)ʲ / j!
//! ```
//!
//! ### Parameters
//! - **`alpha`**, **`beta`**: shape parameters `> 0`
//! - **`lambda`**: noncentrality `>= 0`; `lambda = 0` is the central beta distribution
//!
//! Both tails are summed as independent series, so the upper tail keeps relative
//! precision where the lower tail is close to 1.

use crate::config::{SolverConfig, SOLVER_MAX_ITER};
use crate::errors::{log_invalid_parameter, KernelError, Result};
use crate::kernels::scientific::distributions::shared::noncentral::poisson_weighted_sum;
use crate::kernels::scientific::distributions::shared::roots::{golden_section_min, invert_cdf};
use crate::kernels::scientific::distributions::shared::scalar::{
    incomplete_beta, incomplete_beta_upper, ln_beta_density,
};
use crate::traits::distribution::{ContinuousDistribution, Interval, Support};
use crate::traits::real::Real;

/// Noncentral beta distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoncentralBeta<T: Real> {
    alpha: T,
    beta: T,
    lambda: T,
    /// Poisson mean `λ/2`.
    m: T,
}

impl<T: Real> NoncentralBeta<T> {
    /// # Errors
    /// `KernelError::InvalidParameters` unless `alpha`, `beta` are finite and positive
    /// and `lambda` is finite and non-negative.
    pub fn new(alpha: T, beta: T, lambda: T) -> Result<Self> {
        for (name, v) in [("alpha", alpha), ("beta", beta)] {
            if !(v.is_finite() && v > T::zero()) {
                return Err(KernelError::InvalidParameters(log_invalid_parameter(
                    "NoncentralBeta",
                    name,
                    v,
                    "0 < value < inf",
                )));
            }
        }
        if !(lambda.is_finite() && lambda >= T::zero()) {
            return Err(KernelError::InvalidParameters(log_invalid_parameter(
                "NoncentralBeta",
                "lambda",
                lambda,
                "0 <= lambda < inf",
            )));
        }
        Ok(Self { alpha, beta, lambda, m: lambda * T::half() })
    }

    #[inline]
    pub fn alpha(&self) -> T {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> T {
        self.beta
    }

    #[inline]
    pub fn lambda(&self) -> T {
        self.lambda
    }

    /// `E[Xᵏ] = Σⱼ wⱼ Πᵢ₌₀^{k−1} (α + j + i) / (α + β + j + i)`
    pub fn raw_moment(&self, k: usize) -> T {
        poisson_weighted_sum(self.m, |j| {
            let a = self.alpha + j;
            (0..k).fold(T::one(), |acc, i| {
                let ai = a + T::from_usize(i);
                acc * ai / (ai + self.beta)
            })
        })
    }

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

    /// Density at a support endpoint, where only the lowest-order terms survive.
    fn endpoint_density(&self, x: T) -> T {
        let one = T::one();
        if x == T::zero() {
            // only j = 0 can be non-zero
            if self.alpha < one {
                T::infinity()
            } else if self.alpha == one {
                (-self.m).exp() * self.beta
            } else {
                T::zero()
            }
        } else if self.beta < one {
            T::infinity()
        } else if self.beta == one {
            // Beta(α + j, 1).pdf(1) = α + j
            self.alpha + self.m
        } else {
            T::zero()
        }
    }
}

impl<T: Real> ContinuousDistribution<T> for NoncentralBeta<T> {
    fn pdf(&self, x: T) -> T {
        if x.is_nan() {
            return T::nan();
        }
        if x < T::zero() || x > T::one() {
            return T::zero();
        }
        if x == T::zero() || x == T::one() {
            return self.endpoint_density(x);
        }
        poisson_weighted_sum(self.m, |j| {
            ln_beta_density(self.alpha + j, self.beta, x).exp()
        })
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
            let v = match interval {
                Interval::Lower => poisson_weighted_sum(self.m, |j| {
                    incomplete_beta(self.alpha + j, self.beta, x)
                }),
                Interval::Upper => poisson_weighted_sum(self.m, |j| {
                    incomplete_beta_upper(self.alpha + j, self.beta, x)
                }),
            };
            return v.max(T::zero()).min(T::one());
        };
        match interval {
            Interval::Lower => lower,
            Interval::Upper => T::one() - lower,
        }
    }

    fn quantile(&self, p: T, interval: Interval) -> Result<T> {
        invert_cdf(self, p, interval, self.mean(), &SolverConfig::default())
    }

    fn support(&self) -> Support<T> {
        Support::new(T::zero(), T::one())
    }

    fn mean(&self) -> T {
        self.raw_moment(1)
    }

    fn median(&self) -> T {
        self.quantile(T::half(), Interval::Lower).unwrap_or_else(|_| T::nan())
    }

    /// Interior maximum of the density for `alpha > 1`, `beta > 1`; NaN otherwise.
    fn mode(&self) -> T {
        if !(self.alpha > T::one() && self.beta > T::one()) {
            return T::nan();
        }
        let (x, _, _) = golden_section_min(
            |x| -self.pdf(x),
            T::zero(),
            T::one(),
            T::epsilon().sqrt(),
            SOLVER_MAX_ITER,
        );
        x
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

#[cfg(test)]
mod noncentral_beta_tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() <= tol * b.abs().max(1e-300),
            "assert_close failed: {a} vs {b} (rel tol={tol})"
        );
    }

    #[test]
    fn parameter_region() {
        assert!(NoncentralBeta::new(2.0_f64, 3.0, 0.0).is_ok());
        for (a, b, l) in [(0.0, 1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, -0.5), (f64::NAN, 1.0, 1.0), (1.0, 1.0, f64::INFINITY)] {
            assert!(matches!(NoncentralBeta::new(a, b, l), Err(KernelError::InvalidParameters(_))));
        }
    }

    #[test]
    fn reference_values() {
        let d = NoncentralBeta::new(2.0_f64, 3.0, 1.5).unwrap();
        assert_close(d.pdf(0.3), 1.4225950920032136, 1e-13);
        assert_close(d.cdf(0.1, Interval::Lower), 0.027912098177949144, 1e-13);
        assert_close(d.cdf(0.7, Interval::Upper), 0.14637815203040656, 1e-13);

        let d = NoncentralBeta::new(5.0_f64, 2.0, 30.0).unwrap();
        assert_close(d.cdf(0.5, Interval::Lower), 0.00012530817761161855, 1e-12);
        assert_close(d.pdf(0.9), 5.4788590003964279, 1e-13);
        assert_close(d.cdf(0.99, Interval::Upper), 0.018998121342422225, 1e-12);
    }

    #[test]
    fn central_case_matches_beta() {
        // Beta(2, 3): density 12 x (1 − x)², cdf 6x² − 8x³ + 3x⁴
        let d = NoncentralBeta::new(2.0_f64, 3.0, 0.0).unwrap();
        let x = 0.35_f64;
        assert_close(d.pdf(x), 12.0 * x * (1.0 - x).powi(2), 1e-14);
        assert_close(d.cdf(x, Interval::Lower), 6.0 * x * x - 8.0 * x.powi(3) + 3.0 * x.powi(4), 1e-14);
        assert_close(d.mean(), 0.4, 1e-15);
        assert_close(d.variance(), 0.04, 1e-14);
    }

    #[test]
    fn endpoint_densities() {
        let d = NoncentralBeta::new(1.0_f64, 1.0, 2.0).unwrap();
        assert_close(d.pdf(0.0), (-1.0_f64).exp(), 1e-15);
        assert_close(d.pdf(1.0), 2.0, 1e-15);
        let d = NoncentralBeta::new(0.5_f64, 0.7, 4.0).unwrap();
        assert_eq!(d.pdf(0.0), f64::INFINITY);
        assert_eq!(d.pdf(1.0), f64::INFINITY);
        let d = NoncentralBeta::new(2.0_f64, 3.0, 4.0).unwrap();
        assert_eq!(d.pdf(0.0), 0.0);
        assert_eq!(d.pdf(1.0), 0.0);
        assert_eq!(d.pdf(1.5), 0.0);
        assert!(d.pdf(f64::NAN).is_nan());
    }

    #[test]
    fn moments() {
        let d = NoncentralBeta::new(2.0_f64, 3.0, 1.5).unwrap();
        assert_close(d.mean(), 0.46765926127379559, 1e-14);
        assert_close(d.variance(), 0.041729325496040939, 1e-12);
        assert_close(d.skewness(), 0.031406468038202497, 1e-9);
        assert_close(d.kurtosis(), -0.75157541148033705, 1e-10);
        assert!(d.entropy().is_nan());

        let d = NoncentralBeta::new(0.5_f64, 0.7, 4.0).unwrap();
        assert_close(d.mean(), 0.72788387204421388, 1e-14);
        assert_close(d.skewness(), -1.1108927623380942, 1e-11);
        assert!(d.mode().is_nan());
    }

    #[test]
    fn very_large_noncentrality() {
        // mass piles up against 1; E[X] = 1 − β E[1 / (α + β + J)], J ~ Poisson(λ/2)
        let d = NoncentralBeta::new(2.0_f64, 3.0, 1e9).unwrap();
        assert_close(d.mean(), 1.0 - 3.0 / (5e8 + 5.0), 1e-13);
        let lower = d.cdf(0.999, Interval::Lower);
        let upper = d.cdf(0.999, Interval::Upper);
        assert!(lower < 1e-100, "{lower}");
        assert_close(lower + upper, 1.0, 1e-12);

        let d = NoncentralBeta::new(2.0_f64, 3.0, 1e20).unwrap();
        assert_eq!(d.pdf(0.5), 0.0);
        assert_close(d.mean(), 1.0, 1e-12);
        let total = d.cdf(0.999, Interval::Lower) + d.cdf(0.999, Interval::Upper);
        assert_close(total, 1.0, 1e-12);
    }

    #[test]
    fn mode_maximises_density() {
        let d = NoncentralBeta::new(2.0_f64, 3.0, 1.5).unwrap();
        assert!((d.mode() - 0.46864742790328248).abs() < 1e-7);
        let d = NoncentralBeta::new(5.0_f64, 2.0, 30.0).unwrap();
        assert!((d.mode() - 0.95170139268941007).abs() < 1e-7);
    }
}
