// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **precision-kernels** - *Precision-Generic Continuous Distributions*
//!
//! Density, tail probabilities, quantiles, moments, sampling and fitting for the Argus,
//! Benktander type I, Chi-square and Noncentral-Beta distributions. Every kernel is
//! generic over a [`Real`] scalar and takes its tolerances from the scalar's epsilon,
//! so the same code runs at native `f64` or at any extended precision implementing
//! `num_traits::Float`.
//!
//! ```no_run
//! use precision_kernels::{ChiSquared, ContinuousDistribution, Interval};
//!
//! let d = ChiSquared::new(3.0_f64)?;
//! let p = d.cdf(7.81, Interval::Upper);
//! let x = d.quantile(p, Interval::Upper)?;
//! # Ok::<(), precision_kernels::KernelError>(())
//! ```

pub mod kernels {
    pub mod scientific {
        pub mod distributions;
        pub mod erf;
        pub mod quadrature;
    }
}

pub mod traits {
    pub mod distribution;
    pub mod real;
}

pub mod config;

pub mod errors;

pub use config::{IntegrationConfig, SolverConfig};
pub use errors::{KernelError, Result};
pub use kernels::scientific::distributions::shared::fit::FitResult;
pub use kernels::scientific::distributions::shared::moments::{MomentIntegrator, MomentSet};
pub use kernels::scientific::distributions::shared::sampler::Sampler;
pub use kernels::scientific::distributions::univariate::argus::Argus;
pub use kernels::scientific::distributions::univariate::benktander::Benktander;
pub use kernels::scientific::distributions::univariate::chi_squared::ChiSquared;
pub use kernels::scientific::distributions::univariate::noncentral_beta::NoncentralBeta;
pub use traits::distribution::{ContinuousDistribution, Interval, Support};
pub use traits::real::Real;
