//! Cubic spline interpolation for smooth playback paths
//!
//! Each axis gets its own twice-differentiable piecewise cubic that passes
//! exactly through every knot. The end conditions are not-a-knot: the third
//! derivative is continuous across the second and the second-to-last knots.
//! With only two knots the spline is the straight line between them, and
//! with three it is the single parabola through them.

use crate::capture::types::Sample;
use crate::pipeline::stage::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

/// Resampled point on the fitted path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothSample {
    /// Time from the start of the path
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SmoothSample {
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Round to 3 decimal digits, correctly rounded from the exact binary value
pub(crate) fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}

/// 1D interpolating cubic spline
///
/// Each segment is stored in power form around its left knot, so evaluating
/// exactly at a knot returns the knot value unchanged.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Vec<f64>,
    coefficients: Vec<[f64; 4]>,
}

impl CubicSpline {
    /// Fit a not-a-knot spline through `(knots[i], values[i])`
    ///
    /// Knots must be finite and strictly increasing, with at least two of them.
    pub fn fit(knots: &[f64], values: &[f64]) -> PipelineResult<Self> {
        if knots.len() != values.len() {
            return Err(PipelineError::Domain(format!(
                "{} knots but {} values",
                knots.len(),
                values.len()
            )));
        }
        if knots.len() < 2 {
            return Err(PipelineError::Domain(format!(
                "spline fitting needs at least 2 samples, got {}",
                knots.len()
            )));
        }
        if knots.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(PipelineError::Domain("non-finite knot or value".to_string()));
        }
        if let Some(w) = knots.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PipelineError::Domain(format!(
                "knot times must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }

        let steps: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let slopes: Vec<f64> = values
            .windows(2)
            .zip(&steps)
            .map(|(v, h)| (v[1] - v[0]) / h)
            .collect();

        let moments = match knots.len() {
            2 => vec![0.0; 2],
            3 => vec![2.0 * (slopes[1] - slopes[0]) / (steps[0] + steps[1]); 3],
            _ => not_a_knot_moments(&steps, &slopes),
        };

        let coefficients = (0..steps.len())
            .map(|i| {
                let h = steps[i];
                let (m0, m1) = (moments[i], moments[i + 1]);
                [
                    (m1 - m0) / (6.0 * h),
                    m0 / 2.0,
                    slopes[i] - h * (2.0 * m0 + m1) / 6.0,
                    values[i],
                ]
            })
            .collect();

        Ok(Self {
            knots: knots.to_vec(),
            coefficients,
        })
    }

    /// Evaluate the spline. Outside the knot range the end pieces are extended.
    pub fn evaluate(&self, t: f64) -> f64 {
        let last_segment = self.knots.len() - 2;
        let i = self
            .knots
            .partition_point(|&k| k <= t)
            .saturating_sub(1)
            .min(last_segment);

        let [d, c, b, a] = self.coefficients[i];
        let dx = t - self.knots[i];
        ((d * dx + c) * dx + b) * dx + a
    }

    pub fn start(&self) -> f64 {
        self.knots[0]
    }

    pub fn end(&self) -> f64 {
        self.knots[self.knots.len() - 1]
    }
}

/// Second derivatives at every knot for four or more knots.
///
/// The not-a-knot conditions are folded into the first and last interior
/// rows so the remaining system stays tridiagonal.
fn not_a_knot_moments(h: &[f64], slopes: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    let m = n - 2;

    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        let i = k + 1;
        sub[k] = h[i - 1];
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        sup[k] = h[i];
        rhs[k] = 6.0 * (slopes[i] - slopes[i - 1]);
    }

    let (h0, h1) = (h[0], h[1]);
    sub[0] = 0.0;
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    let (p, q) = (h[n - 3], h[n - 2]);
    sub[m - 1] = (p * p - q * q) / p;
    diag[m - 1] = (p + q) * (2.0 * p + q) / p;
    sup[m - 1] = 0.0;

    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);

    let mut moments = Vec::with_capacity(n);
    moments.push(((h0 + h1) * interior[0] - h0 * interior[1]) / h1);
    moments.extend_from_slice(&interior);
    moments.push(((p + q) * interior[m - 1] - q * interior[m - 2]) / p);
    moments
}

/// Thomas algorithm. The systems built here are diagonally dominant.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let m = diag.len();
    let mut c = vec![0.0; m];
    let mut d = vec![0.0; m];

    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for k in 1..m {
        let denom = diag[k] - sub[k] * c[k - 1];
        c[k] = sup[k] / denom;
        d[k] = (rhs[k] - sub[k] * d[k - 1]) / denom;
    }

    let mut x = vec![0.0; m];
    x[m - 1] = d[m - 1];
    for k in (0..m - 1).rev() {
        x[k] = d[k] - c[k] * x[k + 1];
    }
    x
}

/// Independent splines for the three position axes
#[derive(Debug, Clone)]
pub struct PathSpline {
    pub x: CubicSpline,
    pub y: CubicSpline,
    pub z: CubicSpline,
}

impl PathSpline {
    /// Fit all three axes against the sample timestamps
    pub fn fit(path: &[Sample]) -> PipelineResult<Self> {
        let times: Vec<f64> = path.iter().map(|s| s.id).collect();
        let axis = |f: fn(&Sample) -> f64| -> Vec<f64> { path.iter().map(f).collect() };

        Ok(Self {
            x: CubicSpline::fit(&times, &axis(|s| s.x))?,
            y: CubicSpline::fit(&times, &axis(|s| s.y))?,
            z: CubicSpline::fit(&times, &axis(|s| s.z))?,
        })
    }

    /// Position on the fitted path at time `t`
    pub fn position(&self, t: f64) -> (f64, f64, f64) {
        (self.x.evaluate(t), self.y.evaluate(t), self.z.evaluate(t))
    }
}

/// Fit the path and resample it every `interval` time units
///
/// # Arguments
/// * `path` - Normalized samples with strictly increasing timestamps (at least 2)
/// * `interval` - Time step between output points (e.g., 0.05)
///
/// # Returns
/// `floor((t_last - t_first) / interval)` points starting at the first
/// timestamp, all strictly before the last one, with every value rounded to
/// 3 decimal digits. Fails with a domain error if the samples cannot be fitted.
pub fn resample_path(path: &[Sample], interval: f64) -> PipelineResult<Vec<SmoothSample>> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(PipelineError::Domain(format!(
            "resample interval must be positive, got {}",
            interval
        )));
    }

    let spline = PathSpline::fit(path)?;
    let start = spline.x.start();
    let end = spline.x.end();
    // Quotients like 0.3 / 0.1 land just under a whole number.
    let count = ((end - start) / interval + 1e-9).floor() as usize;

    let smooth: Vec<SmoothSample> = (0..count)
        .map(|i| start + i as f64 * interval)
        .take_while(|&t| t < end)
        .map(|t| {
            let (x, y, z) = spline.position(t);
            SmoothSample {
                t: round3(t),
                x: round3(x),
                y: round3(y),
                z: round3(z),
            }
        })
        .collect();

    tracing::debug!(
        "Resampled {} knots into {} points every {}",
        path.len(),
        smooth.len(),
        interval
    );

    Ok(smooth)
}
