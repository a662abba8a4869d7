#![allow(unused)]

use precision_kernels::{ContinuousDistribution, Interval};

/// Absolute tolerance scaled by `max(1, |e|)`; NaN and infinities must match exactly.
pub fn assert_close(a: f64, e: f64, tol: f64) {
    if e.is_nan() {
        assert!(a.is_nan(), "expected NaN, got {a}");
        return;
    }
    if e.is_infinite() {
        assert!(
            a.is_infinite() && a.is_sign_positive() == e.is_sign_positive(),
            "expected {e}, got {a}"
        );
        return;
    }
    let scale = 1.0_f64.max(e.abs());
    let ok = (a - e).abs() <= tol * scale;
    assert!(ok, "mismatch: got {a}, expect {e} (tol={tol})");
}

/// Relative tolerance, for tail probabilities far below 1.
pub fn assert_rel_close(a: f64, e: f64, tol: f64) {
    if e.is_nan() || e.is_infinite() || e == 0.0 {
        assert_close(a, e, tol);
        return;
    }
    let ok = ((a - e) / e).abs() <= tol;
    assert!(ok, "mismatch: got {a}, expect {e} (rel tol={tol})");
}

pub fn assert_slice_close(a: &[f64], e: &[f64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (&ai, &ei)) in a.iter().zip(e.iter()).enumerate() {
        if ei.is_nan() {
            assert!(ai.is_nan(), "idx {i}: expected NaN, got {ai}");
            continue;
        }
        if ei.is_infinite() {
            assert!(
                ai.is_infinite() && ai.is_sign_positive() == ei.is_sign_positive(),
                "idx {i}: expected {ei}, got {ai}"
            );
            continue;
        }
        let scale = 1.0_f64.max(ei.abs());
        let ok = (ai - ei).abs() <= tol * scale;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (tol={tol})");
    }
}

pub fn assert_slice_rel_close(a: &[f64], e: &[f64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (&ai, &ei)) in a.iter().zip(e.iter()).enumerate() {
        if ei.is_nan() || ei.is_infinite() || ei == 0.0 {
            assert_close(ai, ei, tol);
            continue;
        }
        let ok = ((ai - ei) / ei).abs() <= tol;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (rel tol={tol})");
    }
}

pub fn pdf_at<D: ContinuousDistribution<f64>>(d: &D, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| d.pdf(xi)).collect()
}

pub fn cdf_at<D: ContinuousDistribution<f64>>(d: &D, x: &[f64], interval: Interval) -> Vec<f64> {
    x.iter().map(|&xi| d.cdf(xi, interval)).collect()
}

pub fn quantile_at<D: ContinuousDistribution<f64>>(d: &D, p: &[f64], interval: Interval) -> Vec<f64> {
    p.iter()
        .map(|&pi| d.quantile(pi, interval).unwrap_or(f64::NAN))
        .collect()
}

/// Arguments every kernel must survive without panicking.
pub const IRREGULAR_INPUTS: [f64; 7] = [
    f64::NEG_INFINITY,
    -f64::MAX,
    -f64::MAX / 2.0,
    0.0,
    f64::MAX / 2.0,
    f64::MAX,
    f64::INFINITY,
];
