// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Precision-Generic Continuous Distributions*
//!
//! Distribution kernels providing probability density functions (PDFs), cumulative
//! distribution functions (CDFs) for either tail, quantile functions, moments, sampling
//! and parameter fitting, all generic over the [`Real`](crate::traits::real::Real) scalar.
//!
//! ## Core Statistical Functions
//! Each distribution implements [`ContinuousDistribution`](crate::traits::distribution::ContinuousDistribution):
//! - **Probability density functions**: evaluated in log space where terms can overflow
//! - **Cumulative distribution functions**: lower and upper tails computed independently,
//!   so tiny tail probabilities keep full relative precision
//! - **Quantile functions**: one shared bracket-and-refine root-finder
//! - **Random sampling**: inverse-transform sampling through the quantile
//!
//! ## Computational Architecture
//! - **Series expansions and continued fractions**: incomplete gamma and beta, Bessel and
//!   Kummer functions, with convergence thresholds from the scalar's epsilon
//! - **Poisson mixtures**: noncentral families summed outward from the Poisson mode
//! - **Numerical integration**: adaptive Gauss-Legendre quadrature for moments and tails
//!   without a stable closed form
//!
//! ### Special Values
//! NaN arguments propagate. Infinite and extreme finite arguments are valid inputs and
//! map onto the support boundaries. Moments that are undefined or have no closed form in
//! a family are NaN.
//!
//! ## Numerical Precision and Stability
//! See `./tests` for tolerance requirements, where results are measured against values
//! computed independently at 40 significant digits.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. We make no guarantees as to correctness,
//! fitness for any particular purpose, or suitability for uses such as in
//! life-critical, safety-critical, or financial applications.

/// # **Shared Distribution Utilities** - *Common Infrastructure for Distribution Computing*
///
/// ## Modules
/// - **`constants`**: Bernoulli numbers and seed-approximation coefficients
/// - **`fit`**: quantile-matching parameter fitter
/// - **`moments`**: numerical moments by adaptive quadrature
/// - **`noncentral`**: Poisson-weighted mixture sums
/// - **`roots`**: quantile root-finder and one-dimensional search helpers
/// - **`sampler`**: inverse-transform sampling iterator
/// - **`scalar`**: special functions
pub mod shared {
    pub mod constants;
    pub mod fit;
    pub mod moments;
    pub mod noncentral;
    pub mod roots;
    pub mod sampler;
    pub mod scalar;
}

/// # **Univariate Distributions** - *Single-Variable Continuous Distributions*
pub mod univariate {
    pub mod argus;
    pub mod benktander;
    pub mod chi_squared;
    pub mod noncentral_beta;
}
