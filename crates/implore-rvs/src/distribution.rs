//! Distribution capability traits
//!
//! A distribution is anything that can evaluate its CDF and invert it.
//! Continuous laws additionally expose a density through [`Density`].
//! Survival function, inverse-transform sampling and the slice/ndarray
//! forms all come for free from those primitives.
//!
//! The traits are implemented here for the common `statrs` continuous
//! distributions, so they can be truncated directly.

use ndarray::{Array, ArrayBase, Data, Dimension, ShapeBuilder};
use rand::distr::Open01;
use rand::Rng;
use statrs::distribution::{
    Beta, Cauchy, Continuous, ContinuousCDF, Exp, Gamma, LogNormal, Normal, StudentsT, Uniform,
    Weibull,
};

use crate::error::{validation, RvsResult};

/// Univariate distribution with a CDF and its generalized inverse
pub trait Distribution {
    /// Cumulative distribution function `P(X <= x)`
    fn cdf(&self, x: f64) -> f64;

    /// Generalized inverse of the CDF for `u` in [0, 1]
    fn ppf(&self, u: f64) -> RvsResult<f64>;

    /// Survival function `1 - cdf(x)`
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Evaluate the CDF at every point of a slice
    fn cdf_batch(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.cdf(x)).collect()
    }

    /// Evaluate the survival function at every point of a slice
    fn sf_batch(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.sf(x)).collect()
    }

    /// Invert the CDF at every probability of a slice
    ///
    /// All probabilities are checked before any inversion happens.
    fn ppf_batch(&self, us: &[f64]) -> RvsResult<Vec<f64>> {
        validation::validate_probabilities(us)?;
        us.iter().map(|&u| self.ppf(u)).collect()
    }

    /// Evaluate the CDF elementwise over an array of any shape
    fn cdf_array<S, D>(&self, xs: &ArrayBase<S, D>) -> Array<f64, D>
    where
        Self: Sized,
        S: Data<Elem = f64>,
        D: Dimension,
    {
        xs.mapv(|x| self.cdf(x))
    }

    /// Invert the CDF elementwise over an array of any shape
    fn ppf_array<S, D>(&self, us: &ArrayBase<S, D>) -> RvsResult<Array<f64, D>>
    where
        Self: Sized,
        S: Data<Elem = f64>,
        D: Dimension,
    {
        validation::validate_probabilities(us.iter())?;
        let mut out = Array::zeros(us.raw_dim());
        for (o, &u) in out.iter_mut().zip(us.iter()) {
            *o = self.ppf(u)?;
        }
        Ok(out)
    }

    /// Draw one variate by inverse-transform sampling
    fn sample<R>(&self, rng: &mut R) -> RvsResult<f64>
    where
        Self: Sized,
        R: Rng + ?Sized,
    {
        let u: f64 = rng.sample(Open01);
        self.ppf(u)
    }

    /// Draw `n` independent variates
    fn sample_n<R>(&self, n: usize, rng: &mut R) -> RvsResult<Vec<f64>>
    where
        Self: Sized,
        R: Rng + ?Sized,
    {
        (0..n).map(|_| self.sample(&mut *rng)).collect()
    }

    /// Draw an array of independent variates with the given shape
    fn sample_array<Sh, R>(&self, shape: Sh, rng: &mut R) -> RvsResult<Array<f64, Sh::Dim>>
    where
        Self: Sized,
        Sh: ShapeBuilder,
        R: Rng + ?Sized,
    {
        let mut out = Array::zeros(shape);
        for o in out.iter_mut() {
            *o = self.sample(&mut *rng)?;
        }
        Ok(out)
    }
}

/// Continuous distribution with a probability density
pub trait Density: Distribution {
    /// Probability density function
    fn pdf(&self, x: f64) -> f64;

    /// Evaluate the density at every point of a slice
    fn pdf_batch(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }

    /// Evaluate the density elementwise over an array of any shape
    fn pdf_array<S, D>(&self, xs: &ArrayBase<S, D>) -> Array<f64, D>
    where
        Self: Sized,
        S: Data<Elem = f64>,
        D: Dimension,
    {
        xs.mapv(|x| self.pdf(x))
    }
}

impl<T: Distribution + ?Sized> Distribution for &T {
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }

    fn ppf(&self, u: f64) -> RvsResult<f64> {
        (**self).ppf(u)
    }
}

impl<T: Density + ?Sized> Density for &T {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

macro_rules! impl_statrs_density {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Distribution for $ty {
                fn cdf(&self, x: f64) -> f64 {
                    ContinuousCDF::cdf(self, x)
                }

                fn ppf(&self, u: f64) -> RvsResult<f64> {
                    // statrs panics outside [0, 1]
                    validation::validate_probability(u)?;
                    Ok(ContinuousCDF::inverse_cdf(self, u))
                }

                fn sf(&self, x: f64) -> f64 {
                    ContinuousCDF::sf(self, x)
                }
            }

            impl Density for $ty {
                fn pdf(&self, x: f64) -> f64 {
                    Continuous::pdf(self, x)
                }
            }
        )+
    };
}

impl_statrs_density!(Normal, LogNormal, Exp, Uniform, Gamma, Beta, StudentsT, Cauchy, Weibull);
