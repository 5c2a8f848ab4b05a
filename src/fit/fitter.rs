//! Standard-curve fitting: degeneracy checks, seeding, and the solver run.

use levenberg_marquardt::LevenbergMarquardt;

use crate::domain::{FitParams, StandardPoint};
use crate::error::CalcError;
use crate::fit::problem::FourPlProblem;
use crate::math;

/// Solver patience: caps function evaluations at `patience * (n_params + 1)`.
/// A clean plate converges in well under a hundred evaluations; this bound
/// only matters for pathological data.
const FIT_PATIENCE: usize = 2_000;

/// Fit the 4PL curve to prepared standard points.
pub fn fit_standards(standards: &[StandardPoint]) -> Result<FitParams, CalcError> {
    let concentrations: Vec<f64> = standards.iter().map(|p| p.concentration).collect();
    let signals: Vec<f64> = standards.iter().map(|p| p.signal).collect();
    fit_curve(&concentrations, &signals)
}

/// Fit the 4PL curve to raw concentration/signal arrays.
///
/// Rejects degenerate inputs up front (too few distinct concentrations,
/// constant signals, an unusable EC50 seed) so the optimizer never sees a
/// problem it cannot solve. A run that reaches the optimizer can still fail
/// on non-convergence or a non-finite parameter vector.
pub fn fit_curve(concentrations: &[f64], signals: &[f64]) -> Result<FitParams, CalcError> {
    if concentrations.len() != signals.len() {
        return Err(CalcError::fit(format!(
            "concentration/signal length mismatch: {} vs {}",
            concentrations.len(),
            signals.len()
        )));
    }
    if concentrations.iter().chain(signals).any(|v| !v.is_finite()) {
        return Err(CalcError::fit("standards contain a non-finite value"));
    }

    let mut distinct = concentrations.to_vec();
    distinct.sort_unstable_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() < 4 {
        return Err(CalcError::fit(format!(
            "need at least 4 distinct standard concentrations, found {}",
            distinct.len()
        )));
    }

    let lo = signals.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = signals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo == 0.0 {
        return Err(CalcError::fit(
            "standard signals are constant; no curve to fit",
        ));
    }

    let seed = seed_params(concentrations, signals)?;
    let problem = FourPlProblem::new(concentrations.to_vec(), signals.to_vec(), &seed);
    let (solved, report) = LevenbergMarquardt::new()
        .with_patience(FIT_PATIENCE)
        .minimize(problem);
    if !report.termination.was_successful() {
        return Err(CalcError::fit(format!(
            "optimizer did not converge: {:?}",
            report.termination
        )));
    }

    let fit = solved.decode();
    let finite = fit.a.is_finite() && fit.b.is_finite() && fit.c.is_finite() && fit.d.is_finite();
    if !finite || fit.c <= 0.0 {
        return Err(CalcError::fit("optimizer produced unusable parameters"));
    }
    Ok(fit)
}

/// Data-driven starting point:
///
/// - `a` at the smallest observed signal, `d` at the largest
/// - unit slope
/// - EC50 at the median concentration
fn seed_params(concentrations: &[f64], signals: &[f64]) -> Result<FitParams, CalcError> {
    let a0 = signals.iter().copied().fold(f64::INFINITY, f64::min);
    let d0 = signals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sorted = concentrations.to_vec();
    let c0 = math::median_mut(&mut sorted)
        .ok_or_else(|| CalcError::fit("no standard concentrations to seed from"))?;
    if c0 <= 0.0 {
        return Err(CalcError::fit(format!(
            "median standard concentration {c0} cannot seed the EC50"
        )));
    }
    Ok(FitParams { a: a0, b: 1.0, c: c0, d: d0 })
}
