//! Shared helpers for the integration tests

use implore_rvs::create_rng;
use rand::rngs::SmallRng;

/// Install a test-writer subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// `num` evenly spaced points from `start` to `stop`, both included
#[allow(dead_code)]
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Generator with a fixed seed so statistical assertions are reproducible
#[allow(dead_code)]
pub fn seeded_rng() -> SmallRng {
    create_rng(20_240_917)
}

/// Relative frequency of each index in `0..len`
#[allow(dead_code)]
pub fn frequencies(indices: &[usize], len: usize) -> Vec<f64> {
    let mut counts = vec![0usize; len];
    for &i in indices {
        counts[i] += 1;
    }
    counts
        .into_iter()
        .map(|c| c as f64 / indices.len() as f64)
        .collect()
}
