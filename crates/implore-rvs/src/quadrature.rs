//! Adaptive Gauss-Kronrod quadrature
//!
//! Global adaptive bisection driven by the 15-point Kronrod rule, with the
//! embedded 7-point Gauss rule providing the per-interval error estimate.
//! Infinite limits are mapped onto finite intervals before integrating.

use serde::{Deserialize, Serialize};

use crate::config::QuadConfig;
use crate::error::{RvsError, RvsResult};

/// Kronrod abscissae on [-1, 1]; odd indices are the Gauss nodes, the last is the center
#[allow(clippy::excessive_precision)]
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Kronrod weights matching `XGK`
#[allow(clippy::excessive_precision)]
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the center
#[allow(clippy::excessive_precision)]
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

const EVALS_PER_RULE: usize = 15;

/// Result of adaptive quadrature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadResult {
    /// Estimated integral
    pub value: f64,
    /// Estimated absolute error
    pub error: f64,
    /// Number of integrand evaluations
    pub neval: usize,
    /// Whether the requested tolerance was met
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl Segment {
    fn integrate<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Self {
        let center = 0.5 * (a + b);
        let half = 0.5 * (b - a);

        let fc = f(center);
        let mut kronrod = fc * WGK[7];
        let mut gauss = fc * WG[3];

        for j in 0..7 {
            let dx = half * XGK[j];
            let pair = f(center - dx) + f(center + dx);
            kronrod += WGK[j] * pair;
            if j % 2 == 1 {
                gauss += WG[j / 2] * pair;
            }
        }

        Self {
            a,
            b,
            value: kronrod * half,
            error: ((kronrod - gauss) * half).abs(),
        }
    }
}

/// Integrate `f` over `[a, b]`
///
/// Either limit may be infinite. Reversed limits negate the result and
/// equal limits give zero.
pub fn quad<F>(f: F, a: f64, b: f64, config: &QuadConfig) -> RvsResult<QuadResult>
where
    F: Fn(f64) -> f64,
{
    if a.is_nan() || b.is_nan() {
        return Err(RvsError::Quadrature(format!(
            "integration limits must not be NaN, got [{}, {}]",
            a, b
        )));
    }
    if a == b {
        return Ok(QuadResult {
            value: 0.0,
            error: 0.0,
            neval: 0,
            converged: true,
        });
    }
    if a > b {
        let reversed = quad(f, b, a, config)?;
        return Ok(QuadResult {
            value: -reversed.value,
            ..reversed
        });
    }

    match (a.is_finite(), b.is_finite()) {
        (true, true) => adaptive(&f, a, b, config),
        // x = a + t / (1 - t), t in [0, 1)
        (true, false) => adaptive(
            &|t: f64| {
                let s = 1.0 - t;
                f(a + t / s) / (s * s)
            },
            0.0,
            1.0,
            config,
        ),
        // x = b - (1 - t) / t, t in (0, 1]
        (false, true) => adaptive(&|t: f64| f(b - (1.0 - t) / t) / (t * t), 0.0, 1.0, config),
        // x = t / (1 - t^2), t in (-1, 1)
        (false, false) => adaptive(
            &|t: f64| {
                let d = 1.0 - t * t;
                f(t / d) * (1.0 + t * t) / (d * d)
            },
            -1.0,
            1.0,
            config,
        ),
    }
}

fn adaptive<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, config: &QuadConfig) -> RvsResult<QuadResult> {
    let limit = config.limit.max(1) as usize;
    let mut segments = vec![Segment::integrate(f, a, b)];
    let mut neval = EVALS_PER_RULE;

    let (value, error, converged) = loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();

        if error <= config.atol.max(config.rtol * value.abs()) {
            break (value, error, true);
        }
        if segments.len() >= limit {
            break (value, error, false);
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|x, y| x.1.error.total_cmp(&y.1.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);
        if mid <= segment.a || mid >= segment.b {
            // Interval no longer representable at double precision
            segments.push(segment);
            break (value, error, false);
        }

        segments.push(Segment::integrate(f, segment.a, mid));
        segments.push(Segment::integrate(f, mid, segment.b));
        neval += 2 * EVALS_PER_RULE;
    };

    if !value.is_finite() {
        return Err(RvsError::Quadrature(format!(
            "integral over [{}, {}] is not finite ({})",
            a, b, value
        )));
    }
    if !converged {
        tracing::warn!(
            value,
            error,
            subdivisions = segments.len(),
            "quadrature did not reach the requested tolerance"
        );
    }

    Ok(QuadResult {
        value,
        error,
        neval,
        converged,
    })
}
