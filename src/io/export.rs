//! Clipboard-oriented text renderings of the results table.
//!
//! The host UI owns the actual clipboard; this module only produces the
//! payload strings.

use crate::domain::SampleResult;

const TSV_HEADER: &str = "Sample\tMean OD\tConc.\tStatus";

/// Render the results as tab-separated text: a header row plus one line
/// per sample, each line terminated by `\n`.
///
/// Labels are free text from the input table, so embedded tabs and line
/// breaks are flattened to spaces; every result is guaranteed to occupy
/// exactly one line with exactly four fields.
pub fn results_tsv(results: &[SampleResult]) -> String {
    let mut out = String::from(TSV_HEADER);
    out.push('\n');
    for r in results {
        out.push_str(&sanitize(r.label.as_deref().unwrap_or("")));
        out.push('\t');
        out.push_str(&r.display_mean());
        out.push('\t');
        out.push_str(&r.display_concentration());
        out.push('\t');
        out.push_str(r.status.display_name());
        out.push('\n');
    }
    out
}

/// The TSV flattened into a single line-safe blob: real newlines become
/// the two-character sequence `\n` and stray carriage returns are
/// dropped, so the payload survives transports that eat line breaks.
pub fn clipboard_blob(results: &[SampleResult]) -> String {
    results_tsv(results).replace('\n', "\\n").replace('\r', "")
}

fn sanitize(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleStatus;

    fn result(label: &str, mean: f64, conc: Option<f64>, status: SampleStatus) -> SampleResult {
        SampleResult {
            label: Some(label.to_string()),
            mean_signal: Some(mean),
            concentration: conc,
            status,
        }
    }

    #[test]
    fn renders_header_and_one_line_per_result() {
        let results = vec![
            result("Control", 0.5137, Some(402.1239), SampleStatus::Ok),
            result("A1", 3.6037, None, SampleStatus::AboveRange),
        ];
        let tsv = results_tsv(&results);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sample\tMean OD\tConc.\tStatus");
        assert_eq!(lines[1], "Control\t0.514\t402.12\tOK");
        assert_eq!(lines[2], "A1\t3.604\t> Range\tAbove Range");
        assert!(tsv.ends_with('\n'));
    }

    #[test]
    fn labels_with_embedded_separators_are_flattened() {
        let results = vec![result("bad\tlabel\nhere", 1.0, None, SampleStatus::OutOfRange)];
        let tsv = results_tsv(&results);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "bad label here\t1.000\tOOR\tOOR");
    }

    #[test]
    fn tsv_round_trips_through_a_tsv_parser() {
        let results = vec![
            result("Control", 0.5135, Some(402.12), SampleStatus::Ok),
            result("A2 (1:10)", 0.1835, Some(104.3), SampleStatus::Ok),
            result("Blank", 0.0905, None, SampleStatus::BelowLod),
        ];
        let tsv = results_tsv(&results);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(tsv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), results.len());
        for (row, r) in rows.iter().zip(&results) {
            assert_eq!(row.len(), 4);
            assert_eq!(&row[0], r.label.as_deref().unwrap());
            assert_eq!(&row[1], r.display_mean().as_str());
            assert_eq!(&row[2], r.display_concentration().as_str());
            assert_eq!(&row[3], r.status.display_name());
        }
    }

    #[test]
    fn clipboard_blob_is_a_single_line() {
        let results = vec![
            result("Control", 0.5135, Some(402.12), SampleStatus::Ok),
            result("A1", 3.6035, None, SampleStatus::AboveRange),
        ];
        let blob = clipboard_blob(&results);
        assert!(!blob.contains('\n'));
        assert!(!blob.contains('\r'));
        assert!(blob.contains("\\n"));
        assert!(blob.starts_with("Sample\tMean OD\tConc.\tStatus\\n"));
    }
}
