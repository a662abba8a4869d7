// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for distribution construction and evaluation.
//!
//! ## Error Categories
//! - **Parameter Errors**: a distribution was requested with parameters outside its
//!   admissible region. Raised at construction; no instance is ever created.
//! - **Domain Errors**: a call-time argument is outside the mathematical domain of the
//!   operation, e.g. a probability that is NaN or outside `[0, 1]`.
//!
//! Undefined moments are *not* errors - they return NaN. Precision degradation in
//! iterative kernels is not an error either: the best estimate is returned and a
//! `tracing` event is emitted.

use thiserror::Error;

/// Error type for all kernel operations.
///
/// Each variant includes a contextual message string describing the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Distribution parameters outside their admissible region.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Call-time argument outside the operation's domain.
    #[error("Domain error: {0}")]
    Domain(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Formats the message for a rejected distribution parameter.
pub fn log_invalid_parameter(family: &str, name: &str, value: impl std::fmt::Display, rule: &str) -> String {
    format!("{family} => {name} = {value} violates {rule}")
}
