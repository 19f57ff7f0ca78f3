//! Empirical distribution of a finite sample
//!
//! The CDF is a right-continuous step function: for a sample of n values,
//! `F(z) = (number of values <= z) / n`, with a jump of
//! `multiplicity / n` at every distinct value. The quantile function uses
//! the sample's own order statistics and never interpolates.
//!
//! Two binary-search conventions are in play and must not be mixed:
//! the right insertion point (`v <= z`) counts ties into the CDF, the left
//! insertion point (`v < z`) excludes them, which gives the half-open
//! interval used by [`EmpiricalDistribution::conditional_mean`].

use rand::distr::Open01;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::{validation, RvsError, RvsResult};

/// Empirical distribution built from samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct EmpiricalDistribution {
    /// Sorted copy of the samples, ties retained
    values: Vec<f64>,
}

impl EmpiricalDistribution {
    /// Build from samples
    ///
    /// The samples are copied and sorted; the caller's slice is untouched.
    /// Infinite values are kept, NaN values are rejected.
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn new(samples: &[f64]) -> RvsResult<Self> {
        Self::from_vec(samples.to_vec())
    }

    fn from_vec(mut values: Vec<f64>) -> RvsResult<Self> {
        if values.is_empty() {
            return Err(RvsError::EmptySample);
        }
        let nan = values.iter().filter(|v| v.is_nan()).count();
        if nan > 0 {
            return Err(RvsError::NonFiniteSample { count: nan });
        }

        values.sort_by(f64::total_cmp);
        tracing::debug!(n = values.len(), "built empirical distribution");
        Ok(Self { values })
    }

    /// Proportion of samples `<= z`
    ///
    /// Time complexity: O(log n)
    pub fn cdf(&self, z: f64) -> f64 {
        if z.is_nan() {
            return f64::NAN;
        }
        self.count_at_most(z) as f64 / self.len() as f64
    }

    /// Proportion of samples `> z`
    pub fn sf(&self, z: f64) -> f64 {
        1.0 - self.cdf(z)
    }

    /// Probability mass at exactly `x` (multiplicity / n)
    pub fn pmf(&self, x: f64) -> f64 {
        (self.count_at_most(x) - self.count_below(x)) as f64 / self.len() as f64
    }

    /// Lower empirical quantile
    ///
    /// Returns the order statistic at index `floor(q * (n - 1))`, so
    /// `quantile(0)` is the minimum and `quantile(1)` the maximum. Flat across
    /// duplicated values.
    pub fn quantile(&self, q: f64) -> RvsResult<f64> {
        validation::validate_probability(q)?;
        let last = self.len() - 1;
        let index = (q * last as f64).floor() as usize;
        Ok(self.values[index.min(last)])
    }

    /// Generalized inverse of the CDF: smallest sample `v` with `cdf(v) >= q`
    ///
    /// Unlike [`quantile`](Self::quantile) this is a right inverse of the
    /// CDF, `cdf(inverse_cdf(q)) >= q`, and maps every stored value back to
    /// itself through `inverse_cdf(cdf(v))`.
    pub fn inverse_cdf(&self, q: f64) -> RvsResult<f64> {
        validation::validate_probability(q)?;
        let len = self.len();
        let n = len as f64;

        // Smallest count k with k / n >= q, using the same division as cdf
        let mut k = ((q * n).ceil() as usize).min(len);
        while k > 1 && (k - 1) as f64 / n >= q {
            k -= 1;
        }
        while k < len && (k as f64 / n) < q {
            k += 1;
        }
        Ok(self.values[k.max(1) - 1])
    }

    /// Lower quantiles for every probability in `qs`
    ///
    /// All probabilities are checked before any lookup happens.
    pub fn quantiles(&self, qs: &[f64]) -> RvsResult<Vec<f64>> {
        validation::validate_probabilities(qs)?;
        qs.iter().map(|&q| self.quantile(q)).collect()
    }

    /// Mean of the samples `v` with `a <= v < b`
    ///
    /// Returns `f64::INFINITY` when no sample falls in the interval.
    pub fn conditional_mean(&self, a: f64, b: f64) -> f64 {
        let lo = self.count_below(a);
        let hi = self.count_below(b);
        if hi <= lo {
            return f64::INFINITY;
        }
        let window = &self.values[lo..hi];
        window.iter().sum::<f64>() / window.len() as f64
    }

    /// Sample mean
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.len() as f64
    }

    /// Smallest sample
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest sample
    pub fn max(&self) -> f64 {
        self.values[self.len() - 1]
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; construction rejects empty samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted samples
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Right insertion point: number of samples `<= z`
    fn count_at_most(&self, z: f64) -> usize {
        self.values.partition_point(|&v| v <= z)
    }

    /// Left insertion point: number of samples `< z`
    fn count_below(&self, z: f64) -> usize {
        self.values.partition_point(|&v| v < z)
    }
}

impl Distribution for EmpiricalDistribution {
    fn cdf(&self, x: f64) -> f64 {
        EmpiricalDistribution::cdf(self, x)
    }

    /// Lower quantile, see [`quantile`](EmpiricalDistribution::quantile)
    ///
    /// This is not the inverse used by [`sample`](Distribution::sample);
    /// draws go through [`inverse_cdf`](EmpiricalDistribution::inverse_cdf),
    /// which reaches the maximum for `u < 1`.
    fn ppf(&self, u: f64) -> RvsResult<f64> {
        self.quantile(u)
    }

    /// Draws go through [`inverse_cdf`](EmpiricalDistribution::inverse_cdf),
    /// so every stored value has probability `1 / n`
    fn sample<R>(&self, rng: &mut R) -> RvsResult<f64>
    where
        Self: Sized,
        R: Rng + ?Sized,
    {
        let u: f64 = rng.sample(Open01);
        self.inverse_cdf(u)
    }
}

impl TryFrom<Vec<f64>> for EmpiricalDistribution {
    type Error = RvsError;

    fn try_from(values: Vec<f64>) -> RvsResult<Self> {
        Self::from_vec(values)
    }
}

impl From<EmpiricalDistribution> for Vec<f64> {
    fn from(dist: EmpiricalDistribution) -> Self {
        dist.values
    }
}
