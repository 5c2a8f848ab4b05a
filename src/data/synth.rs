//! Synthetic plate generation.
//!
//! Builds input tables from a known four-parameter curve so tests and
//! demos can check the pipeline against ground truth. Signals are the
//! forward model plus optional Gaussian read noise; generation is
//! deterministic for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::FitParams;
use crate::error::CalcError;
use crate::io::Table;
use crate::model;

/// Recipe for a generated plate.
#[derive(Debug, Clone)]
pub struct SynthPlate {
    /// Ground-truth curve the signals are drawn from.
    pub params: FitParams,
    /// Standard ladder, in assay units. Positive and finite.
    pub standard_concentrations: Vec<f64>,
    /// Samples as (label, true concentration) pairs.
    pub samples: Vec<(String, f64)>,
    /// Replicate wells per row.
    pub replicates: usize,
    /// Standard deviation of additive signal noise; zero for exact reads.
    pub noise_sd: f64,
    pub seed: u64,
}

impl Default for SynthPlate {
    fn default() -> Self {
        Self {
            params: FitParams {
                a: 0.09,
                b: 1.1,
                c: 700.0,
                d: 2.5,
            },
            standard_concentrations: vec![5000.0, 2500.0, 1250.0, 625.0, 313.0, 156.0, 78.1],
            samples: Vec::new(),
            replicates: 2,
            noise_sd: 0.0,
            seed: 7,
        }
    }
}

/// Generates an input table from a [`SynthPlate`] recipe.
pub fn generate_plate(spec: &SynthPlate) -> Result<Table, CalcError> {
    if spec.replicates == 0 {
        return Err(CalcError::malformed("replicate count must be at least 1"));
    }
    if spec.standard_concentrations.is_empty() {
        return Err(CalcError::malformed("standard ladder is empty"));
    }
    if spec
        .standard_concentrations
        .iter()
        .any(|&c| !c.is_finite() || c <= 0.0)
    {
        return Err(CalcError::malformed(
            "standard concentrations must be positive and finite",
        ));
    }
    if !spec.noise_sd.is_finite() || spec.noise_sd < 0.0 {
        return Err(CalcError::malformed(
            "noise standard deviation must be finite and non-negative",
        ));
    }
    if !(spec.params.c > 0.0) {
        return Err(CalcError::malformed(format!(
            "EC50 {} cannot generate a curve",
            spec.params.c
        )));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, spec.noise_sd)
        .map_err(|e| CalcError::malformed(format!("noise distribution: {e}")))?;

    let mut headers = vec!["Type".to_string(), "Sample Name".to_string(), "Conc".to_string()];
    for rep in 1..=spec.replicates {
        headers.push(format!("OD_Rep{rep}"));
    }

    let mut rows = Vec::with_capacity(spec.standard_concentrations.len() + spec.samples.len());
    for &conc in &spec.standard_concentrations {
        let mut row = vec!["Standard".to_string(), String::new(), format!("{conc}")];
        push_reads(&mut row, &spec.params, conc, spec.replicates, &noise, &mut rng);
        rows.push(row);
    }
    for (label, conc) in &spec.samples {
        let mut row = vec!["Sample".to_string(), label.clone(), String::new()];
        push_reads(&mut row, &spec.params, *conc, spec.replicates, &noise, &mut rng);
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

fn push_reads(
    row: &mut Vec<String>,
    params: &FitParams,
    conc: f64,
    replicates: usize,
    noise: &Normal<f64>,
    rng: &mut StdRng,
) {
    for _ in 0..replicates {
        let signal = model::forward(params, conc) + noise.sample(rng);
        // Three decimals, the precision a plate reader reports.
        row.push(format!("{signal:.3}"));
    }
}
