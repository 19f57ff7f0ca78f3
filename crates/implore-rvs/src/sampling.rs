//! Discrete sampling from unnormalized weights
//!
//! Uses the inverse-CDF method over the cumulative sum of the weights. The
//! uniform draw is scaled by the total instead of normalizing the cumulative
//! sum, so no normalization pass is needed. A log-domain entry point
//! accepts unnormalized log-probabilities and stabilizes them by
//! subtracting the maximum before exponentiating.

use rand::distr::Open01;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DISTRIBUTION_TOLERANCE;
use crate::error::{validation, RvsError, RvsResult};

/// Creates a fast, seeded random number generator.
///
/// The sequence is deterministic for a given seed on the same platform.
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Check whether `p` is a probability vector
///
/// True iff every entry is non-negative and the entries sum to one within
/// an absolute tolerance of `1e-10`.
pub fn is_distribution(p: &[f64]) -> bool {
    is_distribution_with_tolerance(p, DEFAULT_DISTRIBUTION_TOLERANCE)
}

/// [`is_distribution`] with an explicit tolerance on the sum
pub fn is_distribution_with_tolerance(p: &[f64], tolerance: f64) -> bool {
    p.iter().all(|&x| x >= 0.0) && (1.0 - p.iter().sum::<f64>()).abs() < tolerance
}

/// How strongly to temper a distribution in [`anneal`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Annealing {
    /// Temperature `T > 0`; the exponent is `1 / T`
    Temperature(f64),
    /// Inverse temperature `beta >= 0`, used directly as the exponent
    InverseTemperature(f64),
}

impl Annealing {
    fn exponent(self) -> RvsResult<f64> {
        match self {
            Annealing::Temperature(t) if t.is_finite() && t > 0.0 => Ok(1.0 / t),
            Annealing::InverseTemperature(beta) if beta.is_finite() && beta >= 0.0 => Ok(beta),
            Annealing::Temperature(t) | Annealing::InverseTemperature(t) => {
                Err(RvsError::InvalidTemperature(t))
            }
        }
    }
}

/// Temper a weight vector: `p^(1/T)` renormalized to sum to one
///
/// High temperatures flatten the distribution, low temperatures sharpen it
/// toward its mode.
pub fn anneal(p: &[f64], annealing: Annealing) -> RvsResult<Vec<f64>> {
    validation::validate_weights(p)?;
    let exponent = annealing.exponent()?;

    let powered: Vec<f64> = p.iter().map(|&x| x.powf(exponent)).collect();
    let total: f64 = powered.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(RvsError::InvalidWeights(format!(
            "annealed weights have total {}",
            total
        )));
    }
    Ok(powered.into_iter().map(|x| x / total).collect())
}

/// Inverse-CDF sampler over a fixed, unnormalized weight vector
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteSampler {
    /// Running sum of the weights
    cumulative: Vec<f64>,
}

impl DiscreteSampler {
    /// Build a sampler from non-negative weights with a positive total
    pub fn new(weights: &[f64]) -> RvsResult<Self> {
        validation::validate_weights(weights)?;

        let cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |acc, &w| {
                *acc += w;
                Some(*acc)
            })
            .collect();

        tracing::debug!(outcomes = cumulative.len(), "built discrete sampler");
        Ok(Self { cumulative })
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always false; construction rejects empty weights
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Normalized probability of outcome `i`
    pub fn probability(&self, i: usize) -> Option<f64> {
        let upper = *self.cumulative.get(i)?;
        let lower = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        Some((upper - lower) / self.total())
    }

    /// Cumulative sum of the weights
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Smallest index `i` with `cumulative[i] >= u * total`
    pub fn index_for(&self, u: f64) -> RvsResult<usize> {
        validation::validate_probability(u)?;
        Ok(self.locate(u))
    }

    /// Map every uniform in `us` to its outcome
    ///
    /// All values are checked before any lookup happens.
    pub fn indices_for(&self, us: &[f64]) -> RvsResult<Vec<usize>> {
        validation::validate_probabilities(us)?;
        Ok(us.iter().map(|&u| self.locate(u)).collect())
    }

    /// Draw one outcome
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.sample(Open01);
        let i = self.locate(u);
        tracing::trace!(u, index = i, "discrete draw");
        i
    }

    /// Draw `n` independent outcomes
    pub fn draw_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<usize> {
        (0..n).map(|_| self.draw(&mut *rng)).collect()
    }

    fn locate(&self, u: f64) -> usize {
        let target = u * self.total();
        // Left insertion point: ties resolve to the first index reaching the target
        let i = self.cumulative.partition_point(|&c| c < target);
        i.min(self.cumulative.len() - 1)
    }
}

/// Draw one index with probability proportional to `weights`
pub fn sample_one<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> RvsResult<usize> {
    Ok(DiscreteSampler::new(weights)?.draw(rng))
}

/// Draw `n` indices with probability proportional to `weights`
pub fn sample<R: Rng + ?Sized>(weights: &[f64], n: usize, rng: &mut R) -> RvsResult<Vec<usize>> {
    Ok(DiscreteSampler::new(weights)?.draw_n(n, rng))
}

/// Map caller-supplied uniforms to indices of `weights`
///
/// The uniforms replace the random draws, so no generator is involved.
pub fn sample_from_uniforms(weights: &[f64], us: &[f64]) -> RvsResult<Vec<usize>> {
    DiscreteSampler::new(weights)?.indices_for(us)
}

/// Convert unnormalized log-weights to linear weights with maximum 1
pub fn log_weights_to_linear(log_weights: &[f64]) -> RvsResult<Vec<f64>> {
    if log_weights.is_empty() {
        return Err(RvsError::InvalidWeights("weight vector is empty".to_string()));
    }
    if let Some(w) = log_weights
        .iter()
        .find(|w| w.is_nan() || **w == f64::INFINITY)
    {
        return Err(RvsError::InvalidWeights(format!(
            "log-weight {} is not usable",
            w
        )));
    }

    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return Err(RvsError::InvalidWeights(
            "all log-weights are -inf".to_string(),
        ));
    }

    Ok(log_weights.iter().map(|&w| (w - max).exp()).collect())
}

/// Draw one index from unnormalized log-probabilities
pub fn log_sample<R: Rng + ?Sized>(log_weights: &[f64], rng: &mut R) -> RvsResult<usize> {
    sample_one(&log_weights_to_linear(log_weights)?, rng)
}

/// Draw `n` indices from unnormalized log-probabilities
pub fn log_sample_n<R: Rng + ?Sized>(
    log_weights: &[f64],
    n: usize,
    rng: &mut R,
) -> RvsResult<Vec<usize>> {
    sample(&log_weights_to_linear(log_weights)?, n, rng)
}
