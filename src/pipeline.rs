//! The "Calculate" pipeline: load → fit → classify → present.
//!
//! Keeping the workflow in one place lets hosts (web handler, desktop
//! app, test harness) focus on presentation: they hand over a table
//! snapshot and render whatever comes back.

use crate::domain::{CalcConfig, CalcOutput, CurveGrid, FitParams, SignalRange, StandardPoint};
use crate::error::CalcError;
use crate::io::{self, Table};
use crate::math;
use crate::model;
use crate::{fit, report};

/// Execute one full calculation over a snapshot of the input table.
///
/// Stateless by construction: every invocation re-reads the table,
/// refits the curve, and rebuilds every output. On error nothing is
/// half-updated because nothing is shared; the host keeps showing
/// whatever it showed before.
pub fn run_calculate(table: &Table, config: &CalcConfig) -> Result<CalcOutput, CalcError> {
    // 1) Load and normalize the table.
    let loaded = io::load_rows(table, config)?;

    // 2) Fit the standard curve.
    let fit = fit::fit_standards(&loaded.standards)?;

    // 3) Empirical signal range of the fitted standards, for the
    //    Low/High classifications.
    let range = SignalRange::of(&loaded.standards)
        .ok_or_else(|| CalcError::fit("no standard signals to bound the range"))?;

    // 4) Classify every sample against the curve.
    let results = report::classify_samples(&loaded.rows, &fit, &range);

    // 5) Evaluate the plottable curve over the padded concentration range.
    let curve = build_curve(&loaded.standards, &fit, config);

    Ok(CalcOutput {
        fit,
        curve,
        standards: loaded.standards,
        results,
        notes: loaded.notes,
    })
}

/// The curve grid spans the standards' concentration range padded by
/// `curve_pad_decades` on each side, log-spaced.
fn build_curve(standards: &[StandardPoint], fit: &FitParams, config: &CalcConfig) -> CurveGrid {
    let conc_min = standards
        .iter()
        .map(|p| p.concentration)
        .fold(f64::INFINITY, f64::min);
    let conc_max = standards
        .iter()
        .map(|p| p.concentration)
        .fold(f64::NEG_INFINITY, f64::max);

    let pad = 10f64.powf(config.curve_pad_decades);
    let concentrations = math::log_space(conc_min / pad, conc_max * pad, config.curve_points);
    let signals = concentrations
        .iter()
        .map(|&x| model::forward(fit, x))
        .collect();
    CurveGrid { concentrations, signals }
}
