//! # **ContinuousDistribution trait** - *Capability contract shared by every family*

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use rand::Rng;

use crate::errors::Result;
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::traits::real::Real;

/// Selects which tail a cumulative probability or quantile refers to.
///
/// `Lower` is `P(X <= x)`, `Upper` is `P(X > x)`. Each family evaluates the two tails
/// independently, so tiny upper-tail probabilities are not lost to `1 - lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    #[default]
    Lower,
    Upper,
}

impl Interval {
    /// The opposite tail.
    #[inline(always)]
    pub fn complement(self) -> Self {
        match self {
            Interval::Lower => Interval::Upper,
            Interval::Upper => Interval::Lower,
        }
    }
}

/// Closed interval `[min, max]` on which a density is defined. Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support<T: Real> {
    pub min: T,
    pub max: T,
}

impl<T: Real> Support<T> {
    #[inline(always)]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// `min <= x <= max`. NaN is never contained.
    #[inline(always)]
    pub fn contains(&self, x: T) -> bool {
        x >= self.min && x <= self.max
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Clamps `x` into the support.
    #[inline(always)]
    pub fn clamp(&self, x: T) -> T {
        x.max(self.min).min(self.max)
    }
}

/// A univariate continuous distribution evaluated in the precision of `T`.
///
/// Implementors hold validated parameters only; every method is a pure function of
/// those parameters and its arguments.
///
/// ## Conventions
/// - `pdf` is exactly zero outside [`support`](ContinuousDistribution::support).
/// - `cdf(x, Lower) + cdf(x, Upper) = 1` up to rounding for every finite `x`.
/// - NaN arguments give NaN results. Infinite and extreme finite arguments never panic.
/// - Moments with no defined value, or no closed form in the family, return NaN.
/// - `kurtosis` is the *excess* kurtosis (zero for a normal distribution).
pub trait ContinuousDistribution<T: Real> {
    /// Probability density at `x`.
    fn pdf(&self, x: T) -> T;

    /// Cumulative probability of the selected tail at `x`.
    fn cdf(&self, x: T, interval: Interval) -> T;

    /// Inverse of [`cdf`](ContinuousDistribution::cdf) for the selected tail.
    ///
    /// # Errors
    /// `KernelError::Domain` when `p` is NaN or outside `[0, 1]`.
    fn quantile(&self, p: T, interval: Interval) -> Result<T>;

    fn support(&self) -> Support<T>;

    fn mean(&self) -> T;

    /// The 1/2 quantile.
    fn median(&self) -> T;

    fn mode(&self) -> T;

    fn variance(&self) -> T;

    fn skewness(&self) -> T;

    /// Excess kurtosis.
    fn kurtosis(&self) -> T;

    /// Differential entropy in nats.
    fn entropy(&self) -> T;

    fn std_dev(&self) -> T {
        self.variance().sqrt()
    }

    /// Lazily draws `count` variates by inverse-transform sampling.
    ///
    /// Each item consumes one uniform `f64` from `rng`. The iterator is finite and
    /// yields exactly `count` items; a seeded `rng` reproduces the same sequence.
    fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R, count: usize) -> Sampler<'a, T, Self, R>
    where
        Self: Sized,
    {
        Sampler::new(self, rng, count)
    }
}
