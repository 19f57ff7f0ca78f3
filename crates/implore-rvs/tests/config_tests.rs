//! Configuration driving the sampling and quadrature paths

mod common;

use common::init_tracing;
use implore_rvs::{
    is_distribution_with_tolerance, Distribution, RvsConfig, RvsError, TruncatedDistribution,
};
use statrs::distribution::Exp;

const CONFIG: &str = r#"{
    "quadrature": { "rtol": 1e-10, "atol": 1e-12, "limit": 200 },
    "sampling": { "seed": 7, "distribution_tolerance": 1e-6 }
}"#;

#[test]
fn test_seeded_config_reproduces_draws() {
    init_tracing();
    let config = RvsConfig::from_json(CONFIG).unwrap();
    config.validate().unwrap();

    let t = TruncatedDistribution::new(Exp::new(1.0).unwrap(), 0.5, 2.0).unwrap();
    let first = t.sample_n(64, &mut config.sampling.rng()).unwrap();
    let second = t.sample_n(64, &mut config.sampling.rng()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_quadrature_settings_reach_truncated_mean() {
    let config = RvsConfig::from_json(CONFIG).unwrap();
    let t = TruncatedDistribution::new(Exp::new(1.0).unwrap(), 0.0, 1.0).unwrap();

    // E[X | X <= 1] for a unit exponential
    let e = std::f64::consts::E;
    let expected = (e - 2.0) / (e - 1.0);

    let result = t.mean_with(&config.quadrature).unwrap();
    assert!(result.converged);
    assert!((result.value - expected).abs() < 1e-10);
}

#[test]
fn test_distribution_tolerance_from_config() {
    let config = RvsConfig::from_json(CONFIG).unwrap();
    let tol = config.sampling.distribution_tolerance;
    assert!(is_distribution_with_tolerance(&[0.5, 0.5000001], tol));
    assert!(!is_distribution_with_tolerance(&[0.5, 0.501], tol));
}

#[test]
fn test_invalid_config_converts_to_rvs_error() {
    let mut config = RvsConfig::new();
    config.quadrature.limit = 0;
    let err: RvsError = config.validate().unwrap_err().into();
    assert!(matches!(err, RvsError::Config(_)));
}
