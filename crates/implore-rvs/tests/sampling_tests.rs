//! Discrete sampling integration tests

mod common;

use common::{frequencies, init_tracing, seeded_rng};
use implore_rvs::{
    anneal, is_distribution, log_sample, log_sample_n, sample, sample_from_uniforms, Annealing,
    DiscreteSampler, RvsError,
};
use proptest::prelude::*;
use rstest::rstest;

// === Frequencies ===

#[rstest]
#[case(vec![1.0, 1.0, 2.0])]
#[case(vec![0.1, 0.7, 0.2])]
#[case(vec![3.0, 0.0, 1.0, 4.0])]
fn test_draw_frequencies_follow_weights(#[case] weights: Vec<f64>) {
    init_tracing();
    let mut rng = seeded_rng();
    let total: f64 = weights.iter().sum();

    let draws = sample(&weights, 100_000, &mut rng).unwrap();
    let freq = frequencies(&draws, weights.len());
    for (f, w) in freq.iter().zip(&weights) {
        assert!((f - w / total).abs() < 0.01, "frequency {} for weight {}", f, w);
    }
}

#[test]
fn test_log_sample_matches_linear_sample() {
    let weights = [1.0, 1.0, 2.0];
    let log_weights: Vec<f64> = weights.iter().map(|w: &f64| w.ln()).collect();
    let mut rng = seeded_rng();

    let linear = frequencies(&sample(&weights, 100_000, &mut rng).unwrap(), 3);
    let logged = frequencies(&log_sample_n(&log_weights, 100_000, &mut rng).unwrap(), 3);

    assert!((linear[2] - 0.5).abs() < 0.01);
    assert!((logged[2] - 0.5).abs() < 0.01);
    for (a, b) in linear.iter().zip(&logged) {
        assert!((a - b).abs() < 0.015);
    }
}

#[test]
fn test_log_sample_survives_extreme_log_weights() {
    let mut rng = seeded_rng();
    let log_weights = [-1e4, -1e4 + 2.0_f64.ln()];
    let draws: Vec<usize> = (0..20_000)
        .map(|_| log_sample(&log_weights, &mut rng).unwrap())
        .collect();
    let freq = frequencies(&draws, 2);
    assert!((freq[1] - 2.0 / 3.0).abs() < 0.02);
}

// === Supplied Uniforms ===

#[test]
fn test_uniform_grid_gives_exact_proportions() {
    let us: Vec<f64> = (0..1000).map(|i| (i as f64 + 0.5) / 1000.0).collect();
    let idx = sample_from_uniforms(&[1.0, 1.0, 2.0], &us).unwrap();

    let counts: Vec<usize> = (0..3)
        .map(|k| idx.iter().filter(|&&i| i == k).count())
        .collect();
    assert_eq!(counts, vec![250, 250, 500]);
}

#[test]
fn test_bad_uniform_rejects_whole_batch() {
    assert!(matches!(
        sample_from_uniforms(&[1.0, 2.0], &[0.2, 1.2, 0.4]),
        Err(RvsError::ProbabilityOutOfRange(_))
    ));
}

// === Probability Vectors ===

#[test]
fn test_is_distribution_examples() {
    assert!(is_distribution(&[0.2, 0.3, 0.5]));
    assert!(!is_distribution(&[0.2, 0.3, 0.6]));
    assert!(!is_distribution(&[-0.1, 1.1]));
}

#[test]
fn test_annealed_weights_can_be_sampled() {
    let p = [0.1, 0.2, 0.7];
    let hot = anneal(&p, Annealing::Temperature(1e6)).unwrap();
    assert!(is_distribution(&hot));

    let mut rng = seeded_rng();
    let freq = frequencies(&sample(&hot, 60_000, &mut rng).unwrap(), 3);
    assert!(freq.iter().all(|f| (f - 1.0 / 3.0).abs() < 0.015));
}

proptest! {
    #[test]
    fn prop_index_never_lands_on_zero_weight(
        weights in prop::collection::vec(prop_oneof![Just(0.0), 0.01f64..10.0], 1..20),
        u in 0.0f64..=1.0,
    ) {
        prop_assume!(weights.iter().any(|&w| w > 0.0));
        let sampler = DiscreteSampler::new(&weights).unwrap();
        let i = sampler.index_for(u).unwrap();
        prop_assert!(i < weights.len());
        // u == 0 resolves to the first index, which may carry no weight
        if u > 0.0 {
            prop_assert!(weights[i] > 0.0);
        }
    }

    #[test]
    fn prop_probabilities_form_a_distribution(
        weights in prop::collection::vec(0.0f64..100.0, 1..30),
    ) {
        prop_assume!(weights.iter().sum::<f64>() > 0.0);
        let sampler = DiscreteSampler::new(&weights).unwrap();
        let p: Vec<f64> = (0..sampler.len())
            .map(|i| sampler.probability(i).unwrap())
            .collect();
        prop_assert!(is_distribution(&p));
    }
}
