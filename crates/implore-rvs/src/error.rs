//! Error types for implore-rvs
//!
//! Every failure here is a precondition violation reported at the call that
//! made it. Nothing is retried and no partial result is produced.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for random variate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RvsError {
    /// Truncation bounds are reversed or not comparable
    #[error("Invalid truncation bounds: lower {lower} must not exceed upper {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    /// Truncation interval carries no probability under the base law
    #[error("Truncation interval [{lower}, {upper}] has zero probability mass")]
    ZeroMass { lower: f64, upper: f64 },

    /// Probability argument outside [0, 1]
    #[error("Probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    /// Empirical distribution built from no samples
    #[error("Cannot build an empirical distribution from an empty sample")]
    EmptySample,

    /// Empirical distribution built from NaN samples
    #[error("Sample contains {count} NaN value(s)")]
    NonFiniteSample { count: usize },

    /// Weight vector unusable for sampling
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Annealing temperature must be positive and finite
    #[error("Invalid temperature: {0}")]
    InvalidTemperature(f64),

    /// Quadrature produced a non-finite value
    #[error("Quadrature failed: {0}")]
    Quadrature(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for random variate operations
pub type RvsResult<T> = Result<T, RvsError>;

/// Validation utilities shared by the distribution types
pub mod validation {
    use super::*;

    /// Validate that `p` is a probability in [0, 1]
    pub fn validate_probability(p: f64) -> RvsResult<()> {
        if (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(RvsError::ProbabilityOutOfRange(p))
        }
    }

    /// Validate every probability in `ps`, reporting the first offender
    pub fn validate_probabilities<'a, I>(ps: I) -> RvsResult<()>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        ps.into_iter().try_for_each(|&p| validate_probability(p))
    }

    /// Validate truncation bounds
    pub fn validate_bounds(lower: f64, upper: f64) -> RvsResult<()> {
        // NaN fails the comparison and is rejected here too
        if lower <= upper {
            Ok(())
        } else {
            Err(RvsError::InvalidBounds { lower, upper })
        }
    }

    /// Validate an unnormalized weight vector and return its total
    pub fn validate_weights(weights: &[f64]) -> RvsResult<f64> {
        if weights.is_empty() {
            return Err(RvsError::InvalidWeights("weight vector is empty".to_string()));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(RvsError::InvalidWeights(format!(
                "weight {} at index {} must be finite and non-negative",
                w, i
            )));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(RvsError::InvalidWeights(format!(
                "weights must have a positive finite total, got {}",
                total
            )));
        }
        Ok(total)
    }
}
