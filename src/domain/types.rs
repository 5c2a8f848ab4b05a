//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during loading and fitting
//! - handed to a host application for charting/table/export UI
//! - rebuilt from scratch on every "Calculate" invocation (no cross-run state)

use serde::{Deserialize, Serialize};

/// How a row participates in the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Known-concentration point used to fit the curve.
    Standard,
    /// Unknown whose concentration is back-calculated from the fit.
    Sample,
}

impl Role {
    /// Human-readable label for table output.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Standard => "Standard",
            Role::Sample => "Sample",
        }
    }
}

/// Role-value matching rules.
///
/// Cell values in the role column are matched case-insensitively by
/// substring against these token lists (`standard`/`std` vs `sample`/`unk`
/// by default). Matching produces a [`Role`] once, during loading; nothing
/// downstream ever looks at the raw string again, so the rule can be
/// swapped without touching the classifier.
#[derive(Debug, Clone)]
pub struct RoleSpec {
    pub standard: Vec<String>,
    pub sample: Vec<String>,
}

impl Default for RoleSpec {
    fn default() -> Self {
        Self {
            standard: vec!["std".to_string(), "standard".to_string()],
            sample: vec!["sample".to_string(), "unk".to_string()],
        }
    }
}

impl RoleSpec {
    /// Resolve a raw role cell to a [`Role`].
    ///
    /// Standard tokens win over sample tokens when a value matches both.
    /// Returns `None` for empty or unrecognized values; the loader records
    /// a row note and excludes the row rather than failing the run.
    pub fn resolve(&self, value: &str) -> Option<Role> {
        let v = value.trim().to_ascii_lowercase();
        if v.is_empty() {
            return None;
        }
        if self.standard.iter().any(|t| v.contains(t.as_str())) {
            return Some(Role::Standard);
        }
        if self.sample.iter().any(|t| v.contains(t.as_str())) {
            return Some(Role::Sample);
        }
        None
    }
}

/// Header-name matching rules for the logical columns.
///
/// A header belongs to the first list (checked in the order role → label →
/// concentration → signal) containing one of its case-insensitive
/// substrings. Headers matching nothing are ignored for computation.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub role: Vec<String>,
    pub label: Vec<String>,
    pub concentration: Vec<String>,
    pub signal: Vec<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            role: vec!["type".to_string(), "role".to_string()],
            label: vec!["name".to_string(), "label".to_string()],
            concentration: vec!["conc".to_string()],
            signal: vec!["od".to_string(), "rep".to_string(), "abs".to_string()],
        }
    }
}

/// Per-invocation configuration.
///
/// Hosts construct one (or use the default) and pass it to
/// [`crate::pipeline::run_calculate`]; it is read-only for the whole run.
#[derive(Debug, Clone)]
pub struct CalcConfig {
    pub columns: ColumnSpec,
    pub roles: RoleSpec,
    /// Number of points in the plottable curve grid.
    pub curve_points: usize,
    /// Decades of padding below the lowest / above the highest standard
    /// concentration when building the curve grid.
    pub curve_pad_decades: f64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSpec::default(),
            roles: RoleSpec::default(),
            curve_points: 100,
            curve_pad_decades: 1.0,
        }
    }
}

/// A parsed input row (either role), kept for display passthrough.
#[derive(Debug, Clone)]
pub struct MeasurementRow {
    pub role: Role,
    pub label: Option<String>,
    /// Known concentration; only meaningful for standards.
    pub concentration: Option<f64>,
    /// Replicate signals in column order; `None` marks a missing cell.
    pub replicates: Vec<Option<f64>>,
    /// Mean of the non-missing replicates, computed once during loading.
    /// `None` when every replicate is missing.
    pub mean_signal: Option<f64>,
}

/// A standard observation that satisfies the fitting invariant
/// (positive concentration, defined mean signal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPoint {
    pub label: Option<String>,
    pub concentration: f64,
    /// Mean replicate signal for this standard.
    pub signal: f64,
}

/// Empirical min/max of the standard signals actually used in fitting.
///
/// This is the threshold pair for the Low/High classifications; it is
/// distinct from the fitted asymptotes, which bound the LOD/saturation
/// classifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRange {
    pub min: f64,
    pub max: f64,
}

impl SignalRange {
    pub fn of(standards: &[StandardPoint]) -> Option<SignalRange> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in standards {
            min = min.min(p.signal);
            max = max.max(p.signal);
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        Some(SignalRange { min, max })
    }
}

/// Fitted 4PL parameters for `y = d + (a - d) / (1 + (x / c)^b)`.
///
/// With `b > 0` the curve runs from `a` at zero concentration to `d` as
/// concentration grows, so for a rising assay `a` is the bottom plateau
/// and `d` the top. The classifier depends on exactly this orientation
/// (`mean <= a` is below LOD, `mean >= d` is saturated).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParams {
    /// Plateau at zero concentration.
    pub a: f64,
    /// Hill slope; the sign selects curve direction.
    pub b: f64,
    /// EC50: concentration at the inflection point. Always positive.
    pub c: f64,
    /// Plateau as concentration grows without bound.
    pub d: f64,
}

/// Classification outcome for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    /// Signal within the fitted curve and the observed standard range.
    Ok,
    /// Signal at or below the bottom asymptote.
    BelowLod,
    /// Signal at or above the top asymptote.
    AboveRange,
    /// Inversion undefined for this signal (or no signal at all).
    OutOfRange,
    /// Inside the asymptotes but below the lowest fitted standard signal;
    /// the extrapolated concentration is still reported.
    LowBelowRange,
    /// Inside the asymptotes but above the highest fitted standard signal.
    HighAboveRange,
}

impl SampleStatus {
    /// Human-readable status string for table output.
    pub fn display_name(self) -> &'static str {
        match self {
            SampleStatus::Ok => "OK",
            SampleStatus::BelowLod => "Below LOD",
            SampleStatus::AboveRange => "Above Range",
            SampleStatus::OutOfRange => "OOR",
            SampleStatus::LowBelowRange => "Low (<Range)",
            SampleStatus::HighAboveRange => "High (>Range)",
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResult {
    pub label: Option<String>,
    /// Mean replicate signal at full precision; display rounds to 3 decimals.
    pub mean_signal: Option<f64>,
    /// Back-calculated concentration at full precision; present only for
    /// the Ok / LowBelowRange / HighAboveRange statuses.
    pub concentration: Option<f64>,
    pub status: SampleStatus,
}

impl SampleResult {
    /// Concentration as shown to the user: two decimals, or the status
    /// sentinel when no numeric value exists.
    pub fn display_concentration(&self) -> String {
        match (self.status, self.concentration) {
            (SampleStatus::BelowLod, _) => "< LOD".to_string(),
            (SampleStatus::AboveRange, _) => "> Range".to_string(),
            (_, Some(c)) => format!("{c:.2}"),
            (_, None) => "OOR".to_string(),
        }
    }

    /// Mean signal as shown to the user (3 decimals, `NaN` when undefined).
    pub fn display_mean(&self) -> String {
        match self.mean_signal {
            Some(m) => format!("{m:.3}"),
            None => "NaN".to_string(),
        }
    }
}

/// A note about a row the loader could not use as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowNote {
    /// 1-based line number in the source table (header is line 1).
    pub line: usize,
    pub label: Option<String>,
    pub message: String,
}

/// The fitted curve evaluated on a log-spaced concentration grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub concentrations: Vec<f64>,
    pub signals: Vec<f64>,
}

/// Everything a "Calculate" invocation produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcOutput {
    pub fit: FitParams,
    /// Plottable curve (log-spaced grid through the standards' range).
    pub curve: CurveGrid,
    /// The standard points used in fitting, for plotting as markers.
    pub standards: Vec<StandardPoint>,
    /// One entry per sample row, in input order.
    pub results: Vec<SampleResult>,
    /// Loader diagnostics for rows that were excluded or trimmed.
    pub notes: Vec<RowNote>,
}
