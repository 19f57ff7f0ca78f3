//! Truncated distributions
//!
//! Restricts any continuous base law `D` to an interval `[a, b]` and
//! renormalizes by the interval's mass `F(b) - F(a)`. The base CDF at both
//! bounds is computed once at construction; every query afterwards is a
//! pure function of those cached values and the base law.
//!
//! Sampling is inverse-transform: a uniform `u` is mapped into
//! `[F(a), F(b)]` and pushed back through the base quantile function.

use crate::config::QuadConfig;
use crate::distribution::{Density, Distribution};
use crate::error::{validation, RvsError, RvsResult};
use crate::quadrature::{quad, QuadResult};

/// Distribution of `X | a <= X <= b` for `X ~ D`
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedDistribution<D> {
    base: D,
    lower: f64,
    upper: f64,
    cdf_lower: f64,
    cdf_upper: f64,
    /// Probability of `[lower, upper]` under the base law
    mass: f64,
}

impl<D: Density> TruncatedDistribution<D> {
    /// Truncate `base` to `[lower, upper]`
    ///
    /// Fails if `lower > upper` (or either bound is NaN), and if the interval
    /// carries no probability under the base law.
    pub fn new(base: D, lower: f64, upper: f64) -> RvsResult<Self> {
        validation::validate_bounds(lower, upper)?;

        let cdf_lower = base.cdf(lower);
        let cdf_upper = base.cdf(upper);
        let mass = cdf_upper - cdf_lower;
        if mass.is_nan() || mass <= 0.0 {
            return Err(RvsError::ZeroMass { lower, upper });
        }

        tracing::debug!(lower, upper, mass, "built truncated distribution");
        Ok(Self {
            base,
            lower,
            upper,
            cdf_lower,
            cdf_upper,
            mass,
        })
    }

    /// Density: base density renormalized inside `[lower, upper]`, zero outside
    ///
    /// A NaN point gives NaN.
    pub fn pdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if self.contains(x) {
            self.base.pdf(x) / self.mass
        } else {
            0.0
        }
    }

    /// CDF: zero below `lower`, clamped to one at and above `upper`
    ///
    /// A NaN point gives NaN.
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < self.lower {
            return 0.0;
        }
        // min guards floating-point overshoot past the upper bound
        ((self.base.cdf(x) - self.cdf_lower) / self.mass).min(1.0)
    }

    /// Survival function `1 - cdf(x)`
    pub fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Quantile function for `u` in [0, 1]
    ///
    /// Maps `u` to `F(a) + u * (F(b) - F(a))` and inverts the base CDF there.
    pub fn ppf(&self, u: f64) -> RvsResult<f64> {
        validation::validate_probability(u)?;
        let p = (self.cdf_lower + u * self.mass).clamp(self.cdf_lower, self.cdf_upper);
        self.base.ppf(p)
    }

    /// Mean by adaptive quadrature of `x * pdf(x)` over the support
    ///
    /// There is no closed form for an arbitrary base law, so the result is
    /// accurate only to the default quadrature tolerance.
    pub fn mean(&self) -> RvsResult<f64> {
        Ok(self.mean_with(&QuadConfig::default())?.value)
    }

    /// Mean with explicit quadrature settings, returning the full estimate
    pub fn mean_with(&self, config: &QuadConfig) -> RvsResult<QuadResult> {
        // The survival-function shortcut only holds for non-negative support
        quad(|x| x * self.pdf(x), self.lower, self.upper, config)
    }

    /// Wrapped base distribution
    pub fn base(&self) -> &D {
        &self.base
    }

    /// Lower truncation bound
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper truncation bound
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Base-law probability of the truncation interval
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Whether `x` lies inside the truncation interval
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl<D: Density> Distribution for TruncatedDistribution<D> {
    fn cdf(&self, x: f64) -> f64 {
        TruncatedDistribution::cdf(self, x)
    }

    fn ppf(&self, u: f64) -> RvsResult<f64> {
        TruncatedDistribution::ppf(self, u)
    }
}

impl<D: Density> Density for TruncatedDistribution<D> {
    fn pdf(&self, x: f64) -> f64 {
        TruncatedDistribution::pdf(self, x)
    }
}
