//! The built-in example plate.
//!
//! A 16-row ELISA layout: an 8-point standard series (including the
//! zero-concentration blank) and 8 samples, each read in duplicate.
//! Hosts can load it to demonstrate the full pipeline without uploading
//! anything.

use crate::io::Table;

/// The example plate as an input table.
///
/// Standards carry no label; samples carry their plate names, including
/// 1:10 dilutions and a blank well.
pub fn example_table() -> Table {
    let headers = ["Type", "Sample Name", "Conc", "OD_Rep1", "OD_Rep2"]
        .into_iter()
        .map(str::to_string)
        .collect();

    let standards: [(&str, &str, &str); 8] = [
        ("5000", "2.368", "2.344"),
        ("2500", "1.475", "1.462"),
        ("1250", "0.919", "0.889"),
        ("625", "0.509", "0.529"),
        ("313", "0.33", "0.322"),
        ("156", "0.209", "0.214"),
        ("78.1", "0.151", "0.151"),
        ("0", "0.091", "0.096"),
    ];
    let samples: [(&str, &str, &str); 8] = [
        ("Control", "0.52", "0.507"),
        ("A1", "3.59", "3.617"),
        ("A2", "0.584", "0.588"),
        ("A3", "3.852", "3.755"),
        ("A1 (1:10)", "2.097", "2.037"),
        ("A2 (1:10)", "0.18", "0.187"),
        ("A3 (1:10)", "2.261", "2.224"),
        ("Blank", "0.091", "0.09"),
    ];

    let mut rows = Vec::with_capacity(standards.len() + samples.len());
    for (conc, r1, r2) in standards {
        rows.push(vec![
            "Standard".to_string(),
            String::new(),
            conc.to_string(),
            r1.to_string(),
            r2.to_string(),
        ]);
    }
    for (name, r1, r2) in samples {
        rows.push(vec![
            "Sample".to_string(),
            name.to_string(),
            String::new(),
            r1.to_string(),
            r2.to_string(),
        ]);
    }

    Table::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalcConfig, Role};
    use crate::io;

    #[test]
    fn example_plate_loads_cleanly() {
        let table = example_table();
        let loaded = io::load_rows(&table, &CalcConfig::default()).unwrap();

        assert_eq!(loaded.rows_read, 16);
        assert_eq!(loaded.rows.len(), 16);
        assert!(loaded.notes.is_empty());
        // Blank (conc 0) is excluded from the fit set.
        assert_eq!(loaded.standards.len(), 7);
        assert_eq!(
            loaded.rows.iter().filter(|r| r.role == Role::Sample).count(),
            8
        );
    }

    #[test]
    fn replicate_means_match_the_plate_read() {
        let table = example_table();
        let loaded = io::load_rows(&table, &CalcConfig::default()).unwrap();

        let top = &loaded.standards[0];
        assert!((top.concentration - 5000.0).abs() < 1e-12);
        assert!((top.signal - 2.356).abs() < 1e-9);

        let control = loaded
            .rows
            .iter()
            .find(|r| r.label.as_deref() == Some("Control"))
            .unwrap();
        assert!((control.mean_signal.unwrap() - 0.5135).abs() < 1e-9);
    }
}
