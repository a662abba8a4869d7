// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # Statistical Sampling Module - Inverse-Transform Sampling
//!
//! Lazy sampling from any [`ContinuousDistribution`] by pushing uniform draws through
//! the distribution's lower-tail quantile. Precision of the samples is that of the
//! quantile; the output is native `f64`.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use rand::Rng;

use crate::traits::distribution::{ContinuousDistribution, Interval};
use crate::traits::real::Real;

/// Finite, lazily evaluated stream of variates from a distribution.
///
/// Borrows the distribution and the random source for its lifetime, yields exactly the
/// requested number of items, and cannot be restarted. A seeded source reproduces the
/// same sequence.
pub struct Sampler<'a, T, D, R>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
    R: Rng + ?Sized,
{
    dist: &'a D,
    rng: &'a mut R,
    remaining: usize,
    _scalar: PhantomData<T>,
}

impl<'a, T, D, R> Sampler<'a, T, D, R>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
    R: Rng + ?Sized,
{
    #[inline]
    pub fn new(dist: &'a D, rng: &'a mut R, count: usize) -> Self {
        Sampler { dist, rng, remaining: count, _scalar: PhantomData }
    }
}

impl<T, D, R> Iterator for Sampler<'_, T, D, R>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
    R: Rng + ?Sized,
{
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // U ∈ [0, 1); U = 0 maps to the lower support boundary.
        let u: f64 = self.rng.random::<f64>();
        let x = self
            .dist
            .quantile(T::lit(u), Interval::Lower)
            .map(Real::to_native)
            .unwrap_or(f64::NAN);
        Some(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, D, R> ExactSizeIterator for Sampler<'_, T, D, R>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
    R: Rng + ?Sized,
{
}

impl<T, D, R> FusedIterator for Sampler<'_, T, D, R>
where
    T: Real,
    D: ContinuousDistribution<T> + ?Sized,
    R: Rng + ?Sized,
{
}
