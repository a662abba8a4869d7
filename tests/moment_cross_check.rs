// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// Closed-form moments against direct quadrature of each density.

mod util;

mod moment_cross_check_tests {
    use super::util::{assert_close, assert_rel_close};
    use precision_kernels::{
        Argus, Benktander, ChiSquared, ContinuousDistribution, IntegrationConfig, MomentIntegrator,
        NoncentralBeta,
    };

    fn cross_check<D: ContinuousDistribution<f64>>(d: &D) {
        let integrator = MomentIntegrator::default();
        assert_close(integrator.mass(d), 1.0, 1e-10);
        let m = integrator.moments(d);
        assert_rel_close(m.mean, d.mean(), 1e-9);
        assert_rel_close(m.variance, d.variance(), 1e-8);
        assert_close(m.skewness, d.skewness(), 1e-7);
        assert_close(m.kurtosis, d.kurtosis(), 1e-6);
    }

    #[test]
    fn chi_squared_moments() {
        for nu in [3.0, 7.5, 40.0] {
            let d = ChiSquared::new(nu).unwrap();
            cross_check(&d);
            let h = MomentIntegrator::default().entropy(&d);
            assert_close(h, d.entropy(), 1e-9);
        }
    }

    #[test]
    fn argus_moments() {
        for alpha in [0.5, 1.0, 5.0] {
            cross_check(&Argus::new(alpha).unwrap());
        }
    }

    #[test]
    fn benktander_moments() {
        for (a, b) in [(2.0, 1.0), (3.0, 0.5), (1.5, 0.5)] {
            cross_check(&Benktander::new(a, b).unwrap());
        }
    }

    #[test]
    fn noncentral_beta_moments() {
        for (a, b, l) in [(2.0, 3.0, 1.5), (5.0, 2.0, 30.0), (3.0, 4.0, 0.0)] {
            cross_check(&NoncentralBeta::new(a, b, l).unwrap());
        }
    }

    #[test]
    fn singular_endpoints_with_configured_integrator() {
        // density unbounded at both ends
        let d = NoncentralBeta::new(0.5_f64, 0.7, 4.0).unwrap();
        let config = IntegrationConfig::default()
            .with_tolerance(1e-11)
            .with_max_evaluations(400_000);
        let integrator = MomentIntegrator::new(config).with_breakpoints(&[d.median()]);
        assert_eq!(integrator.config().max_evaluations, 400_000);
        assert_close(integrator.mass(&d), 1.0, 1e-7);
        assert_rel_close(integrator.mean(&d), d.mean(), 1e-6);
    }

    #[test]
    fn median_below_mean_for_right_skew() {
        let d = Benktander::new(2.0_f64, 1.0).unwrap();
        assert_close(d.median(), 1.3334208706187457, 1e-12);
        assert_close(d.mean(), 1.5, 1e-14);
        // (1 + x/2) e^{−x/2} = ½
        let d = ChiSquared::new(4.0_f64).unwrap();
        let m = d.median();
        assert_close((1.0 + m / 2.0) * (-m / 2.0).exp(), 0.5, 1e-13);
        assert!(m < d.mean());
    }
}
