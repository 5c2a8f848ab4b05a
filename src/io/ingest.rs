//! Table loading and normalization.
//!
//! Turns the raw text table into typed rows that are safe to fit and
//! classify.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear whole-run errors)
//! - **Row-level tolerance**: keep every row that can be understood,
//!   record a note for the rest
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting or classification here

use crate::domain::{CalcConfig, ColumnSpec, MeasurementRow, Role, RowNote, StandardPoint};
use crate::error::CalcError;
use crate::io::table::Table;
use crate::math;

/// Resolved positions of the logical columns.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub role: usize,
    pub label: Option<usize>,
    pub concentration: usize,
    /// Every replicate column, in header order.
    pub signals: Vec<usize>,
}

/// Loader output: normalized rows, fit-ready standards, and diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    /// All recognized rows (standards and samples) in input order.
    pub rows: Vec<MeasurementRow>,
    /// Standards satisfying the fitting invariant: positive concentration
    /// and a defined mean signal. A zero-concentration blank is excluded
    /// here without a note; it is expected on every plate.
    pub standards: Vec<StandardPoint>,
    pub notes: Vec<RowNote>,
    pub rows_read: usize,
}

/// Map each logical column to a header position.
///
/// The first header containing one of the configured tokens wins; lists
/// are tried in the order role → label → concentration → signal, and a
/// header matching none of them is display-only. Role, concentration and
/// at least one signal column are required; label is optional.
pub fn resolve_columns(headers: &[String], spec: &ColumnSpec) -> Result<ColumnMap, CalcError> {
    let mut role = None;
    let mut label = None;
    let mut concentration = None;
    let mut signals = Vec::new();

    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header_name(raw);
        if matches_any(&name, &spec.role) {
            role.get_or_insert(idx);
        } else if matches_any(&name, &spec.label) {
            label.get_or_insert(idx);
        } else if matches_any(&name, &spec.concentration) {
            concentration.get_or_insert(idx);
        } else if matches_any(&name, &spec.signal) {
            signals.push(idx);
        }
    }

    let role = role.ok_or_else(|| missing_column("role", &spec.role))?;
    let concentration =
        concentration.ok_or_else(|| missing_column("concentration", &spec.concentration))?;
    if signals.is_empty() {
        return Err(missing_column("signal", &spec.signal));
    }

    Ok(ColumnMap { role, label, concentration, signals })
}

/// Load and normalize a table into fit-ready structures.
///
/// Row-level problems become notes, not errors: an unrecognized role or
/// an unusable standard is recorded and skipped. Only structural problems
/// abort the run — missing required columns, or non-numeric text where a
/// number is expected.
pub fn load_rows(table: &Table, config: &CalcConfig) -> Result<IngestedTable, CalcError> {
    let columns = resolve_columns(&table.headers, &config.columns)?;

    let mut rows = Vec::new();
    let mut standards = Vec::new();
    let mut notes = Vec::new();

    for idx in 0..table.rows.len() {
        // +2: data rows start on line 2, below the header.
        let line = idx + 2;

        let label = columns.label.and_then(|col| {
            let cell = table.cell(idx, col);
            (!cell.is_empty()).then(|| cell.to_string())
        });

        let role_cell = table.cell(idx, columns.role);
        let Some(role) = config.roles.resolve(role_cell) else {
            let message = if role_cell.trim().is_empty() {
                "row has no role; skipped".to_string()
            } else {
                format!("unrecognized role '{role_cell}'; row skipped")
            };
            notes.push(RowNote { line, label, message });
            continue;
        };

        let concentration =
            parse_numeric_cell(table.cell(idx, columns.concentration), line, "concentration")?;

        let mut replicates = Vec::with_capacity(columns.signals.len());
        for &col in &columns.signals {
            replicates.push(parse_numeric_cell(table.cell(idx, col), line, "signal")?);
        }
        let mean_signal = math::mean_present(&replicates);

        if role == Role::Standard {
            match (concentration, mean_signal) {
                (Some(c), Some(signal)) if c > 0.0 => standards.push(StandardPoint {
                    label: label.clone(),
                    concentration: c,
                    signal,
                }),
                // Zero concentration is the blank; it anchors nothing.
                (Some(c), Some(_)) if c == 0.0 => {}
                (Some(c), Some(_)) => notes.push(RowNote {
                    line,
                    label: label.clone(),
                    message: format!("standard concentration {c} is negative; excluded from fit"),
                }),
                (None, _) => notes.push(RowNote {
                    line,
                    label: label.clone(),
                    message: "standard has no concentration; excluded from fit".to_string(),
                }),
                (_, None) => notes.push(RowNote {
                    line,
                    label: label.clone(),
                    message: "standard has no replicate signals; excluded from fit".to_string(),
                }),
            }
        }

        rows.push(MeasurementRow { role, label, concentration, replicates, mean_signal });
    }

    Ok(IngestedTable { rows, standards, notes, rows_read: table.rows.len() })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and friends sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Type"). Without stripping it, column resolution
    // would report the role column missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn matches_any(normalized: &str, tokens: &[String]) -> bool {
    tokens
        .iter()
        .any(|t| normalized.contains(t.to_ascii_lowercase().as_str()))
}

fn missing_column(what: &str, tokens: &[String]) -> CalcError {
    CalcError::malformed(format!(
        "no {what} column found (looked for a header containing one of: {})",
        tokens.join(", ")
    ))
}

/// Numeric cell contract: empty and `NaN` cells are missing data; any
/// other non-numeric text means the table is not what the user thinks it
/// is, and the run stops before fitting.
fn parse_numeric_cell(raw: &str, line: usize, what: &str) -> Result<Option<f64>, CalcError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(CalcError::malformed(format!(
            "line {line}: {what} value '{text}' is not numeric"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcErrorKind;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_columns_with_bom_and_mixed_case() {
        let headers = headers(&["\u{feff}Type", "Name", "Conc.", "OD 1", "od 2", "Comments"]);
        let map = resolve_columns(&headers, &ColumnSpec::default()).unwrap();
        assert_eq!(map.role, 0);
        assert_eq!(map.label, Some(1));
        assert_eq!(map.concentration, 2);
        assert_eq!(map.signals, vec![3, 4]);
    }

    #[test]
    fn missing_concentration_column_is_malformed() {
        let headers = headers(&["Type", "Name", "OD1"]);
        let err = resolve_columns(&headers, &ColumnSpec::default()).unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::MalformedInput);
        assert!(format!("{err}").contains("concentration"));
    }

    #[test]
    fn missing_signal_columns_are_malformed() {
        let headers = headers(&["Type", "Name", "Conc"]);
        let err = resolve_columns(&headers, &ColumnSpec::default()).unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::MalformedInput);
        assert!(format!("{err}").contains("signal"));
    }

    #[test]
    fn label_column_is_optional() {
        let headers = headers(&["Type", "Conc", "OD1"]);
        let map = resolve_columns(&headers, &ColumnSpec::default()).unwrap();
        assert_eq!(map.label, None);
    }

    fn plate(csv: &str) -> IngestedTable {
        let table = Table::from_csv_str(csv).unwrap();
        load_rows(&table, &CalcConfig::default()).unwrap()
    }

    #[test]
    fn loads_standards_and_samples() {
        let loaded = plate(
            "Type,Name,Conc,OD1,OD2\n\
             Std,Standard 1,1000,2.0,2.1\n\
             Std,Standard 2,100,1.0,1.1\n\
             Sample,A1,,0.5,0.6\n",
        );
        assert_eq!(loaded.rows_read, 3);
        assert_eq!(loaded.rows.len(), 3);
        assert_eq!(loaded.standards.len(), 2);
        assert!(loaded.notes.is_empty());

        let s1 = &loaded.standards[0];
        assert_eq!(s1.label.as_deref(), Some("Standard 1"));
        assert!((s1.signal - 2.05).abs() < 1e-12);

        let sample = &loaded.rows[2];
        assert_eq!(sample.role, Role::Sample);
        assert_eq!(sample.concentration, None);
        assert!((sample.mean_signal.unwrap() - 0.55).abs() < 1e-12);
    }

    #[test]
    fn blank_standard_is_excluded_without_a_note() {
        let loaded = plate(
            "Type,Name,Conc,OD1\n\
             Std,Blank,0,0.09\n\
             Std,Standard 1,100,1.0\n",
        );
        assert_eq!(loaded.standards.len(), 1);
        assert!((loaded.standards[0].concentration - 100.0).abs() < 1e-12);
        assert!(loaded.notes.is_empty());
        // still present as a row for display
        assert_eq!(loaded.rows.len(), 2);
    }

    #[test]
    fn unrecognized_role_becomes_a_note() {
        let loaded = plate(
            "Type,Name,Conc,OD1\n\
             QC,Check,100,1.0\n\
             Sample,A1,,0.5\n",
        );
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.notes.len(), 1);
        assert_eq!(loaded.notes[0].line, 2);
        assert!(loaded.notes[0].message.contains("QC"));
    }

    #[test]
    fn standard_without_concentration_becomes_a_note() {
        let loaded = plate(
            "Type,Name,Conc,OD1\n\
             Std,Standard 1,,1.0\n",
        );
        assert!(loaded.standards.is_empty());
        assert_eq!(loaded.notes.len(), 1);
        assert!(loaded.notes[0].message.contains("no concentration"));
    }

    #[test]
    fn standard_without_signals_becomes_a_note() {
        let loaded = plate(
            "Type,Name,Conc,OD1,OD2\n\
             Std,Standard 1,100,,\n",
        );
        assert!(loaded.standards.is_empty());
        assert_eq!(loaded.notes.len(), 1);
        assert!(loaded.notes[0].message.contains("no replicate signals"));
    }

    #[test]
    fn nan_cells_count_as_missing() {
        let loaded = plate(
            "Type,Name,Conc,OD1,OD2\n\
             Sample,A1,,NaN,0.8\n",
        );
        let row = &loaded.rows[0];
        assert_eq!(row.replicates, vec![None, Some(0.8)]);
        assert!((row.mean_signal.unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn non_numeric_signal_text_aborts_the_run() {
        let table = Table::from_csv_str(
            "Type,Name,Conc,OD1\n\
             Sample,A1,,overflow\n",
        )
        .unwrap();
        let err = load_rows(&table, &CalcConfig::default()).unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::MalformedInput);
        let text = format!("{err}");
        assert!(text.contains("line 2"));
        assert!(text.contains("overflow"));
    }

    #[test]
    fn ragged_rows_read_missing_cells() {
        let loaded = plate(
            "Type,Name,Conc,OD1,OD2\n\
             Sample,A1,,0.5\n",
        );
        let row = &loaded.rows[0];
        assert_eq!(row.replicates, vec![Some(0.5), None]);
    }
}
