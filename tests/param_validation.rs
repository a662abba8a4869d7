// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

mod util;

mod param_validation_tests {
    use precision_kernels::{Argus, Benktander, ChiSquared, KernelError, NoncentralBeta};

    const NON_POSITIVE: [f64; 5] = [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

    fn is_invalid<D>(r: Result<D, KernelError>) -> bool {
        matches!(r, Err(KernelError::InvalidParameters(_)))
    }

    #[test]
    fn chi_squared_rejects_non_positive_nu() {
        for nu in NON_POSITIVE {
            assert!(is_invalid(ChiSquared::new(nu)), "nu = {nu}");
        }
        assert!(ChiSquared::new(1e-8_f64).is_ok());
        assert!(ChiSquared::new(1e6_f64).is_ok());
    }

    #[test]
    fn argus_rejects_non_positive_alpha() {
        for a in NON_POSITIVE {
            assert!(is_invalid(Argus::new(a)), "alpha = {a}");
        }
        assert!(Argus::new(1e-3_f64).is_ok());
        assert!(Argus::new(30.0_f64).is_ok());
    }

    #[test]
    fn benktander_enforces_beta_bound() {
        // 0 < beta <= alpha (alpha + 1) / 2
        assert!(Benktander::new(2.0_f64, 3.0).is_ok());
        assert!(is_invalid(Benktander::new(2.0_f64, 3.0 + 1e-12)));
        assert!(Benktander::new(0.5_f64, 0.375).is_ok());
        assert!(is_invalid(Benktander::new(0.5_f64, 0.4)));
        for v in NON_POSITIVE {
            assert!(is_invalid(Benktander::new(v, 0.5)), "alpha = {v}");
            assert!(is_invalid(Benktander::new(2.0, v)), "beta = {v}");
        }
    }

    #[test]
    fn noncentral_beta_accepts_zero_noncentrality() {
        assert!(NoncentralBeta::new(1.0_f64, 1.0, 0.0).is_ok());
        for v in NON_POSITIVE {
            assert!(is_invalid(NoncentralBeta::new(v, 1.0, 1.0)), "alpha = {v}");
            assert!(is_invalid(NoncentralBeta::new(1.0, v, 1.0)), "beta = {v}");
        }
        for l in [-1e-300, -1.0, f64::NAN, f64::INFINITY] {
            assert!(is_invalid(NoncentralBeta::new(1.0, 1.0, l)), "lambda = {l}");
        }
    }

    #[test]
    fn errors_name_the_parameter() {
        let msg = ChiSquared::new(-2.0_f64).unwrap_err().to_string();
        assert!(msg.contains("nu"), "{msg}");
        let msg = Benktander::new(1.0_f64, 5.0).unwrap_err().to_string();
        assert!(msg.contains("beta"), "{msg}");
    }
}
