//! Configuration for implore-rvs
//!
//! Numerical tolerances and random source settings, loadable from JSON.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute tolerance used when checking that a probability vector sums to one
pub const DEFAULT_DISTRIBUTION_TOLERANCE: f64 = 1e-10;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct RvsConfig {
    /// Adaptive quadrature settings
    #[serde(default)]
    pub quadrature: QuadConfig,
    /// Random source and validity settings
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Adaptive quadrature configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct QuadConfig {
    /// Relative tolerance on the integral
    pub rtol: f64,
    /// Absolute tolerance on the integral
    pub atol: f64,
    /// Maximum number of interval subdivisions
    pub limit: u32,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            rtol: 1.49e-8,
            atol: 1.49e-8,
            limit: 50,
        }
    }
}

/// Sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct SamplingConfig {
    /// Fixed seed for reproducible draws; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Tolerance for `is_distribution`
    pub distribution_tolerance: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            distribution_tolerance: DEFAULT_DISTRIBUTION_TOLERANCE,
        }
    }
}

impl SamplingConfig {
    /// Probability-vector check using the configured tolerance
    pub fn is_distribution(&self, p: &[f64]) -> bool {
        crate::sampling::is_distribution_with_tolerance(p, self.distribution_tolerance)
    }

    /// Build the generator described by this configuration
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => crate::sampling::create_rng(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

impl RvsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let q = &self.quadrature;
        if !(q.rtol >= 0.0 && q.atol >= 0.0) {
            return Err(ConfigError::OutOfRange(
                "quadrature tolerances must be non-negative".to_string(),
            ));
        }
        if q.rtol == 0.0 && q.atol == 0.0 {
            return Err(ConfigError::OutOfRange(
                "at least one quadrature tolerance must be positive".to_string(),
            ));
        }
        if q.limit == 0 {
            return Err(ConfigError::OutOfRange(
                "quadrature limit must be positive".to_string(),
            ));
        }

        let tol = self.sampling.distribution_tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err(ConfigError::OutOfRange(
                "distribution_tolerance must be positive and finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
