// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Numerical Calibration Parameters*
//!
//! Iteration caps and tolerance multipliers controlling the iterative kernels, plus the
//! runtime configuration structs for the quantile solver and the moment integrator.
//!
//! Tolerances are expressed as multiples of the scalar's machine epsilon so the same
//! settings carry over unchanged when the scalar precision changes. All values are
//! calibration constants and may be tuned; none of them changes the meaning of a result,
//! only how hard the kernels work to reach it.

use crate::traits::real::Real;

/// Hard cap on terms for power series and continued fractions in the special functions.
///
/// Exceeding it emits a `tracing::warn!` and returns the current estimate.
pub const SERIES_MAX_ITER: usize = 10_000;

/// Hard cap on Poisson-weighted terms summed by the noncentral kernels, per direction.
pub const NONCENTRAL_MAX_TERMS: usize = 20_000;

/// Default relative tolerance of the quantile solver, in units of machine epsilon.
pub const SOLVER_TOLERANCE_EPS: f64 = 64.0;

/// Default refinement iteration cap of the quantile solver.
pub const SOLVER_MAX_ITER: usize = 400;

/// Cap on geometric bracket expansions before the solver gives up widening.
pub const BRACKET_MAX_ITER: usize = 2_000;

/// Default relative tolerance of the adaptive integrator, in units of machine epsilon.
pub const INTEGRATION_TOLERANCE_EPS: f64 = 256.0;

/// Default cap on integrand evaluations per integral.
pub const INTEGRATION_MAX_EVALUATIONS: usize = 200_000;

/// Gauss-Legendre order of a single integration panel.
pub const GAUSS_LEGENDRE_ORDER: usize = 20;

/// Number of probabilities in the fitter's empirical-quantile grid.
pub const FIT_GRID_POINTS: usize = 64;

/// Minimum number of finite samples before a fit is attempted.
pub const FIT_MIN_SAMPLES: usize = 16;

/// Golden-section iteration cap of the fitter.
pub const FIT_MAX_ITER: usize = 200;

/// Number of coarse scan points across the fitter's search range.
pub const FIT_SCAN_POINTS: usize = 48;

/// Settings for the shared quantile root-finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Real> {
    /// Convergence threshold on the log-probability residual.
    pub tolerance: T,
    /// Refinement iteration cap; the best iterate is returned when reached.
    pub max_iter: usize,
}

impl<T: Real> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::epsilon() * T::lit(SOLVER_TOLERANCE_EPS),
            max_iter: SOLVER_MAX_ITER,
        }
    }
}

/// Settings for adaptive quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig<T: Real> {
    /// Relative error target on the integral.
    pub tolerance: T,
    /// Evaluation cap; the best estimate is returned when reached.
    pub max_evaluations: usize,
}

impl<T: Real> Default for IntegrationConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::epsilon() * T::lit(INTEGRATION_TOLERANCE_EPS),
            max_evaluations: INTEGRATION_MAX_EVALUATIONS,
        }
    }
}

impl<T: Real> IntegrationConfig<T> {
    /// Overrides the relative tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Overrides the evaluation cap.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }
}
