//! CSV loading for benchmark exports.

use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::ColumnMap;
use crate::error::{RankError, Result};
use crate::ranking::types::MeasurementRow;

/// Loads measurement rows from the CSV file at `path`.
#[tracing::instrument(skip(columns))]
pub fn load_file(path: &str, columns: &ColumnMap) -> Result<Vec<MeasurementRow>> {
    let file = File::open(path)
        .map_err(|e| RankError::malformed(path, format!("cannot open: {e}")))?;
    load_rows(file, path, columns)
}

/// Reads measurement rows from any CSV reader, in source order.
///
/// `source_name` is only used in error messages. Rows are neither sorted
/// nor deduplicated.
pub fn load_rows<R: Read>(
    reader: R,
    source_name: &str,
    columns: &ColumnMap,
) -> Result<Vec<MeasurementRow>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| RankError::malformed(source_name, format!("unreadable header: {e}")))?
        .clone();

    let index = ColumnIndex {
        scale: find_column(&headers, &columns.scale, source_name)?,
        relative_error: find_column(&headers, &columns.relative_error, source_name)?,
        fixed_point_time: find_column(&headers, &columns.fixed_point_time, source_name)?,
        decimal_time: find_column(&headers, &columns.decimal_time, source_name)?,
    };

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 1;
        let record = result
            .map_err(|e| RankError::malformed(source_name, format!("row {line}: {e}")))?;
        let cell = |idx: usize, column: &'static str| Cell {
            value: record.get(idx).unwrap_or(""),
            column,
            line,
            source_name,
        };

        rows.push(MeasurementRow {
            scale_exponent: cell(index.scale, "scale").exponent()?,
            relative_error: cell(index.relative_error, "relative error").percentage()?,
            fixed_point_time_ns: cell(index.fixed_point_time, "fixed-point time").nanoseconds()?,
            decimal_time_ns: cell(index.decimal_time, "decimal time").nanoseconds()?,
        });
    }

    debug!(source = source_name, rows = rows.len(), "Loaded measurement rows");
    Ok(rows)
}

struct ColumnIndex {
    scale: usize,
    relative_error: usize,
    fixed_point_time: usize,
    decimal_time: usize,
}

fn find_column(headers: &StringRecord, name: &str, source_name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| RankError::malformed(source_name, format!("missing column '{name}'")))
}

struct Cell<'a> {
    value: &'a str,
    column: &'a str,
    line: usize,
    source_name: &'a str,
}

impl Cell<'_> {
    fn reject(&self, why: &str) -> RankError {
        RankError::malformed(
            self.source_name,
            format!(
                "row {}, {} column: {} ({:?})",
                self.line, self.column, why, self.value
            ),
        )
    }

    fn number(&self) -> Result<f64> {
        let v: f64 = self.value.parse().map_err(|_| self.reject("not a number"))?;
        if !v.is_finite() {
            return Err(self.reject("not a finite number"));
        }
        if v < 0.0 {
            return Err(self.reject("negative value"));
        }
        // "-0" passes the sign check; clear the sign bit so it prints as 0.
        Ok(if v == 0.0 { 0.0 } else { v })
    }

    fn exponent(&self) -> Result<u32> {
        self.value
            .parse()
            .map_err(|_| self.reject("not a non-negative integer"))
    }

    fn percentage(&self) -> Result<f64> {
        self.number()
    }

    // Averaged timings may be fractional; round to the nearest nanosecond.
    fn nanoseconds(&self) -> Result<u64> {
        if let Ok(ns) = self.value.parse::<u64>() {
            return Ok(ns);
        }
        let v = self.number()?;
        if v > u64::MAX as f64 {
            return Err(self.reject("out of range"));
        }
        Ok(v.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ColumnMap {
        ColumnMap::with_suffix("")
    }

    fn load(csv: &str) -> Result<Vec<MeasurementRow>> {
        load_rows(csv.as_bytes(), "test.csv", &plain())
    }

    #[test]
    fn test_load_rows_in_source_order() {
        let rows = load("n,relError,fpNs,decimalNs\n0,50.0,100,10\n1,2.0,200,20\n2,10.0,50,5\n")
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].scale_exponent, 0);
        assert_eq!(rows[1].relative_error, 2.0);
        assert_eq!(rows[2].fixed_point_time_ns, 50);
        assert_eq!(rows[2].decimal_time_ns, 5);
    }

    #[test]
    fn test_load_ignores_extra_columns_and_whitespace() {
        let rows = load("label, decimalNs ,n,fpNs,relError\nx, 7 , 3 ,9, 0.5\n").unwrap();

        assert_eq!(
            rows,
            vec![MeasurementRow {
                scale_exponent: 3,
                relative_error: 0.5,
                fixed_point_time_ns: 9,
                decimal_time_ns: 7,
            }]
        );
    }

    #[test]
    fn test_load_suffixed_columns() {
        let csv = "n,relError_med,fpNs_med,decimalNs_med\n4,1.25,1000,2000\n";
        let rows = load_rows(csv.as_bytes(), "median.csv", &ColumnMap::with_suffix("_med")).unwrap();
        assert_eq!(rows[0].decimal_time_ns, 2000);
    }

    #[test]
    fn test_load_rounds_fractional_times() {
        let rows = load("n,relError,fpNs,decimalNs\n1,0.1,1234.5,99.4\n").unwrap();
        assert_eq!(rows[0].fixed_point_time_ns, 1235);
        assert_eq!(rows[0].decimal_time_ns, 99);
    }

    #[test]
    fn test_load_keeps_duplicate_scales() {
        let rows = load("n,relError,fpNs,decimalNs\n1,0.1,1,1\n1,0.2,2,2\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scale_exponent, rows[1].scale_exponent);
    }

    #[test]
    fn test_load_header_only_is_empty() {
        let rows = load("n,relError,fpNs,decimalNs\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_load_missing_column() {
        let err = load("n,relError,fpNs\n0,1.0,1\n").unwrap_err();
        match err {
            RankError::MalformedSource { source_name, detail } => {
                assert_eq!(source_name, "test.csv");
                assert!(detail.contains("decimalNs"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_non_numeric() {
        let err = load("n,relError,fpNs,decimalNs\n0,1.0,1,1\n1,abc,2,2\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains("relative error"));
    }

    #[test]
    fn test_load_rejects_negative_values() {
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n0,-1.0,1,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n0,1.0,-5,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n-1,1.0,5,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
    }

    #[test]
    fn test_load_negative_zero_is_plain_zero() {
        let rows = load("n,relError,fpNs,decimalNs\n0,-0.0,-0,1\n").unwrap();
        assert!(!rows[0].relative_error.is_sign_negative());
        assert_eq!(format!("{:.6}", rows[0].relative_error), "0.000000");
        assert_eq!(rows[0].fixed_point_time_ns, 0);
    }

    #[test]
    fn test_load_rejects_non_finite() {
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n0,NaN,1,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n0,1.0,inf,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
    }

    #[test]
    fn test_load_rejects_short_row() {
        assert!(matches!(
            load("n,relError,fpNs,decimalNs\n0,1.0,1\n"),
            Err(RankError::MalformedSource { .. })
        ));
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file("/nonexistent/bench.csv", &plain()).unwrap_err();
        assert!(matches!(err, RankError::MalformedSource { .. }));
    }
}
