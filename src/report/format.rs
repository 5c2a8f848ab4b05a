//! Formatted text output: fit summary and results table.

use crate::domain::{CalcOutput, SampleResult, SignalRange};

/// Format the run summary: fitted parameters, standards coverage, curve
/// grid, and any loader notes.
pub fn format_fit_summary(output: &CalcOutput) -> String {
    let mut out = String::new();

    out.push_str("=== 4PL standard curve ===\n");
    out.push_str(&format!("A (plateau at zero): {:.4}\n", output.fit.a));
    out.push_str(&format!("B (slope):           {:.4}\n", output.fit.b));
    out.push_str(&format!("C (EC50):            {:.4}\n", output.fit.c));
    out.push_str(&format!("D (upper plateau):   {:.4}\n", output.fit.d));

    let conc_min = output
        .standards
        .iter()
        .map(|p| p.concentration)
        .fold(f64::INFINITY, f64::min);
    let conc_max = output
        .standards
        .iter()
        .map(|p| p.concentration)
        .fold(f64::NEG_INFINITY, f64::max);
    if let Some(range) = SignalRange::of(&output.standards) {
        out.push_str(&format!(
            "Standards: n={} | conc=[{conc_min}, {conc_max}] | signal=[{:.3}, {:.3}]\n",
            output.standards.len(),
            range.min,
            range.max
        ));
    }

    if let (Some(first), Some(last)) = (
        output.curve.concentrations.first(),
        output.curve.concentrations.last(),
    ) {
        out.push_str(&format!(
            "Curve: {} points over [{first:.3}, {last:.3}]\n",
            output.curve.concentrations.len()
        ));
    }

    if !output.notes.is_empty() {
        out.push_str("\nRow notes:\n");
        for note in &output.notes {
            match &note.label {
                Some(label) => {
                    out.push_str(&format!("- line {} ({label}): {}\n", note.line, note.message));
                }
                None => out.push_str(&format!("- line {}: {}\n", note.line, note.message)),
            }
        }
    }

    out
}

/// Format the per-sample results as a fixed-width text table.
pub fn format_results_table(results: &[SampleResult]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<24} {:>10} {:>12} {:<14}\n",
            "sample", "mean", "conc", "status"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:-<24} {:-<10} {:-<12} {:-<14}\n", "", "", "", "").trim_end());
    out.push('\n');

    for r in results {
        out.push_str(
            format!(
                "{:<24} {:>10} {:>12} {:<14}\n",
                truncate(r.label.as_deref().unwrap_or(""), 24),
                r.display_mean(),
                r.display_concentration(),
                r.status.display_name(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
