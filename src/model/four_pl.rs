//! Four-parameter logistic (4PL) evaluation and inversion.
//!
//! The model is
//!
//! ```text
//! y = d + (a - d) / (1 + (x / c)^b)
//! ```
//!
//! with `x >= 0` a concentration and `y` a signal. With `b > 0` the value
//! at `x = 0` is exactly `a` and the value for large `x` approaches `d`,
//! so a rising assay fits with `a < d`. The classifier relies on that
//! pairing; see [`crate::report::classify_sample`].

use crate::domain::FitParams;

/// Evaluate the curve at concentration `x`.
pub fn forward(p: &FitParams, x: f64) -> f64 {
    p.d + (p.a - p.d) / (1.0 + (x / p.c).powf(p.b))
}

/// Back-calculate the concentration producing signal `y`.
///
/// Defined only strictly between the two asymptotes: at or beyond either
/// plateau the algebra needs the root of a non-positive number and there
/// is no concentration to report, so this returns `None`. A `NaN` input
/// also returns `None`.
pub fn inverse(p: &FitParams, y: f64) -> Option<f64> {
    let term = (p.a - y) / (y - p.d);
    // `!(term > 0.0)` is the NaN-safe form of `term <= 0.0`.
    if !(term > 0.0) {
        return None;
    }
    let x = p.c * term.powf(1.0 / p.b);
    x.is_finite().then_some(x)
}

/// Partial derivatives of [`forward`] with respect to `(a, b, c, d)`.
///
/// Feeds the analytic fit Jacobian. The guards cover the two ends where
/// `(x / c)^b` underflows to zero or overflows: the curve sits flat on a
/// plateau there and only that plateau's partial survives.
pub(crate) fn partials(p: &FitParams, x: f64) -> [f64; 4] {
    let u = (x / p.c).powf(p.b);
    if u == 0.0 {
        return [1.0, 0.0, 0.0, 0.0];
    }
    if !u.is_finite() {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let s = 1.0 / (1.0 + u);
    let span = p.a - p.d;
    [
        s,
        -span * s * s * u * (x / p.c).ln(),
        span * s * s * u * p.b / p.c,
        1.0 - s,
    ]
}
