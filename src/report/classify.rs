//! Sample classification against the fitted curve.
//!
//! The rules are ordered and the first match wins:
//!
//! 1. no usable mean signal → `OutOfRange`
//! 2. mean at or below the `a` plateau → `BelowLod`
//! 3. mean at or above the `d` plateau → `AboveRange`
//! 4. inversion undefined (numeric overflow) → `OutOfRange`
//! 5. mean below the lowest fitted standard signal → `LowBelowRange`,
//!    extrapolated concentration kept
//! 6. mean above the highest fitted standard signal → `HighAboveRange`
//! 7. otherwise → `Ok`
//!
//! Rules 2-3 test against the fitted asymptotes; rules 5-6 test against
//! the empirical signal range of the standards that entered the fit.
//! These are different thresholds on purpose: a signal can sit inside
//! the asymptotes yet outside anything the plate actually measured.

use crate::domain::{FitParams, MeasurementRow, Role, SampleResult, SampleStatus, SignalRange};
use crate::model;

/// Classify one sample's mean signal.
pub fn classify_sample(
    label: Option<String>,
    mean_signal: Option<f64>,
    fit: &FitParams,
    range: &SignalRange,
) -> SampleResult {
    // NaN means fall to the no-signal rule; infinities deliberately do
    // not, so a saturated reading still classifies against the plateaus.
    let Some(mean) = mean_signal.filter(|m| !m.is_nan()) else {
        return SampleResult {
            label,
            mean_signal,
            concentration: None,
            status: SampleStatus::OutOfRange,
        };
    };
    if mean <= fit.a {
        return SampleResult {
            label,
            mean_signal,
            concentration: None,
            status: SampleStatus::BelowLod,
        };
    }
    if mean >= fit.d {
        return SampleResult {
            label,
            mean_signal,
            concentration: None,
            status: SampleStatus::AboveRange,
        };
    }
    let Some(concentration) = model::inverse(fit, mean) else {
        return SampleResult {
            label,
            mean_signal,
            concentration: None,
            status: SampleStatus::OutOfRange,
        };
    };
    let status = if mean < range.min {
        SampleStatus::LowBelowRange
    } else if mean > range.max {
        SampleStatus::HighAboveRange
    } else {
        SampleStatus::Ok
    };
    SampleResult { label, mean_signal, concentration: Some(concentration), status }
}

/// One result per sample row, in input order.
///
/// Standards are not classified, and an unclassifiable sample never
/// blocks the rest of the batch.
pub fn classify_samples(
    rows: &[MeasurementRow],
    fit: &FitParams,
    range: &SignalRange,
) -> Vec<SampleResult> {
    rows.iter()
        .filter(|row| row.role == Role::Sample)
        .map(|row| classify_sample(row.label.clone(), row.mean_signal, fit, range))
        .collect()
}
