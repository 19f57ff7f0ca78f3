//! implore-rvs - Random variate primitives for scientific visualization
//!
//! This crate provides small probabilistic building blocks:
//!
//! - **TruncatedDistribution**: any continuous law restricted to `[a, b]`
//! - **EmpiricalDistribution**: step CDF and lower quantiles of a sample
//! - **DiscreteSampler**: inverse-CDF sampling from unnormalized weights,
//!   with a log-domain entry point
//! - **is_distribution / anneal**: probability-vector checks and tempering
//!
//! # Design Philosophy
//!
//! Distributions are immutable values behind two capability traits,
//! [`Distribution`] (cdf, ppf) and [`Density`] (pdf), so truncated,
//! empirical and `statrs` laws are interchangeable. Everything is
//! synchronous; sampling takes the caller's generator.

pub mod config;
pub mod distribution;
pub mod empirical;
pub mod error;
pub mod quadrature;
pub mod sampling;
pub mod truncated;

pub use config::*;
pub use distribution::*;
pub use empirical::*;
pub use error::*;
pub use quadrature::*;
pub use sampling::*;
pub use truncated::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
