//! The in-memory input table and its CSV adapter.
//!
//! The calculation core never reads files or sockets itself: the hosting
//! application owns the editable table and passes a snapshot of it per
//! invocation. `Table` is that snapshot — a rectangular grid of text
//! cells plus a header row. The CSV constructors exist so hosts (and
//! tests) can build one from an uploaded file in one call.

use crate::error::CalcError;

/// A header row plus data rows, all as raw text cells.
///
/// Rows may be ragged; missing trailing cells read as empty. Cell
/// interpretation (roles, numbers) happens later, in the loader.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// The cell at `(row, col)`, empty for anything out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Parse a CSV stream into a table.
    ///
    /// Flexible mode: ragged rows are accepted (plate exports often pad
    /// columns unevenly) and whitespace is trimmed from every cell. A
    /// stream that cannot be decoded at all fails the whole run.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Table, CalcError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| CalcError::malformed(format!("failed to read CSV headers: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            // +2 because:
            // - records() starts after the header row
            // - CSV line numbers are 1-based
            let line = idx + 2;
            let record = result
                .map_err(|e| CalcError::malformed(format!("CSV parse error at line {line}: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table { headers, rows })
    }

    pub fn from_csv_str(text: &str) -> Result<Table, CalcError> {
        Self::from_csv_reader(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_csv() {
        let table = Table::from_csv_str("Type,Name,Conc,OD1\nStd,Standard 1,5000,2.3\n").unwrap();
        assert_eq!(table.headers, vec!["Type", "Name", "Conc", "OD1"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.cell(0, 2), "5000");
    }

    #[test]
    fn ragged_rows_read_as_empty_cells() {
        let table = Table::from_csv_str("Type,Conc,OD1,OD2\nStd,100,0.5\n").unwrap();
        assert_eq!(table.cell(0, 2), "0.5");
        assert_eq!(table.cell(0, 3), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn cells_are_trimmed() {
        let table = Table::from_csv_str("Type , Conc\n  Std ,  100 \n").unwrap();
        assert_eq!(table.headers[0], "Type");
        assert_eq!(table.cell(0, 0), "Std");
        assert_eq!(table.cell(0, 1), "100");
    }

    #[test]
    fn undecodable_bytes_are_a_malformed_input() {
        let bytes: &[u8] = b"Type,Conc\nStd,\xff\xfe\n";
        assert!(Table::from_csv_reader(bytes).is_err());
    }
}
