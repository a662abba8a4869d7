// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Moment Integrator** - *Numerical Moments from a Density Alone*
//!
//! Computes mean, variance, skewness, excess kurtosis and entropy of any
//! [`ContinuousDistribution`] by adaptive quadrature of its density over its support.
//! It never consults a family's closed forms, which makes it an independent check on
//! them rather than a primary evaluation path.
//!
//! Central moments are integrated about the numerically obtained mean, and every
//! moment is divided by the integrated mass so a density normalised to within a few
//! ulps does not bias the result. Entropy is `−∫ f ln f` with non-positive density
//! values contributing zero.

use crate::config::IntegrationConfig;
use crate::kernels::scientific::quadrature::integrate;
use crate::traits::distribution::ContinuousDistribution;
use crate::traits::real::Real;

/// Numerically integrated moments of one distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentSet<T: Real> {
    pub mean: T,
    pub variance: T,
    pub skewness: T,
    /// Excess kurtosis.
    pub kurtosis: T,
    pub entropy: T,
}

/// Adaptive-quadrature moment engine.
#[derive(Debug, Clone)]
pub struct MomentIntegrator<T: Real> {
    config: IntegrationConfig<T>,
    breakpoints: Vec<T>,
}

impl<T: Real> Default for MomentIntegrator<T> {
    fn default() -> Self {
        Self::new(IntegrationConfig::default())
    }
}

impl<T: Real> MomentIntegrator<T> {
    pub fn new(config: IntegrationConfig<T>) -> Self {
        Self { config, breakpoints: Vec::new() }
    }

    /// Adds interior points where the density has a kink, a peak or a singularity.
    pub fn with_breakpoints(mut self, points: &[T]) -> Self {
        self.breakpoints.extend_from_slice(points);
        self
    }

    pub fn config(&self) -> &IntegrationConfig<T> {
        &self.config
    }

    /// Breakpoints for one distribution: the configured ones plus its mode.
    fn points_for<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> Vec<T> {
        let mut pts = self.breakpoints.clone();
        let mode = dist.mode();
        if mode.is_finite() {
            pts.push(mode);
        }
        pts
    }

    /// `∫ f(x) g(x) dx` over the support.
    fn weighted<D, G>(&self, dist: &D, points: &[T], g: G) -> T
    where
        D: ContinuousDistribution<T> + ?Sized,
        G: Fn(T) -> T,
    {
        let s = dist.support();
        integrate(
            |x| {
                let f = dist.pdf(x);
                if f == T::zero() {
                    T::zero()
                } else {
                    f * g(x)
                }
            },
            s.min,
            s.max,
            points,
            &self.config,
        )
    }

    pub fn mass<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        let pts = self.points_for(dist);
        self.weighted(dist, &pts, |_| T::one())
    }

    pub fn mean<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        let pts = self.points_for(dist);
        let mass = self.weighted(dist, &pts, |_| T::one());
        self.weighted(dist, &pts, |x| x) / mass
    }

    /// `E[(X − μ)^k]` for `k = 2, 3, 4`, with the mean and mass supplied.
    fn central<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D, pts: &[T], mu: T, mass: T, k: i32) -> T {
        self.weighted(dist, pts, |x| (x - mu).powi(k)) / mass
    }

    pub fn variance<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        self.moments(dist).variance
    }

    pub fn skewness<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        self.moments(dist).skewness
    }

    pub fn kurtosis<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        self.moments(dist).kurtosis
    }

    pub fn entropy<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> T {
        let pts = self.points_for(dist);
        self.entropy_with(dist, &pts)
    }

    fn entropy_with<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D, pts: &[T]) -> T {
        let s = dist.support();
        -integrate(
            |x| {
                let f = dist.pdf(x);
                if f > T::zero() && f.is_finite() {
                    f * f.ln()
                } else {
                    T::zero()
                }
            },
            s.min,
            s.max,
            pts,
            &self.config,
        )
    }

    /// All moments in one pass over the shared breakpoints.
    pub fn moments<D: ContinuousDistribution<T> + ?Sized>(&self, dist: &D) -> MomentSet<T> {
        let pts = self.points_for(dist);
        let mass = self.weighted(dist, &pts, |_| T::one());
        let mean = self.weighted(dist, &pts, |x| x) / mass;
        let variance = self.central(dist, &pts, mean, mass, 2);
        let m3 = self.central(dist, &pts, mean, mass, 3);
        let m4 = self.central(dist, &pts, mean, mass, 4);
        MomentSet {
            mean,
            variance,
            skewness: m3 / variance.powf(T::lit(1.5)),
            kurtosis: m4 / (variance * variance) - T::lit(3.0),
            entropy: self.entropy_with(dist, &pts),
        }
    }
}
