//! Measurement ingest.
//!
//! Turns either inline values or a CSV file into one or more `MeasurementSet`s.
//!
//! CSV rules:
//! - a header row is required; names are matched case-insensitively
//! - the value column defaults to `value`
//! - an optional set column groups rows into independent sets, kept in order
//!   of first appearance; without it the whole file is one set
//! - bad rows are skipped and reported, not fatal

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::MeasurementSet;
use crate::error::AppError;

/// Default name of the measurement column.
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// How to read measurements out of a CSV.
#[derive(Debug, Clone)]
pub struct CsvLayout {
    pub value_column: String,
    pub set_column: Option<String>,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            set_column: None,
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: measurement sets + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub sets: Vec<MeasurementSet>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Wrap inline command-line values as a single set.
pub fn from_values(label: &str, values: &[f64]) -> IngestedData {
    IngestedData {
        sets: vec![MeasurementSet::new(label, values.to_vec())],
        row_errors: Vec::new(),
        rows_read: values.len(),
        rows_used: values.len(),
    }
}

/// Load measurement sets from a CSV file.
pub fn load_measurements(path: &Path, layout: &CsvLayout) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let default_label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "measurements".to_string());
    read_measurements(file, layout, &default_label)
}

/// Read measurement sets from any CSV source.
pub fn read_measurements<R: Read>(source: R, layout: &CsvLayout, default_label: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let value_idx = column_index(&header_map, &layout.value_column)?;
    let set_idx = layout
        .set_column
        .as_deref()
        .map(|name| column_index(&header_map, name))
        .transpose()?;

    let mut sets: Vec<MeasurementSet> = Vec::new();
    let mut set_lookup: HashMap<String, usize> = HashMap::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_used = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let value = match parse_value(&record, value_idx) {
            Ok(v) => v,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        let label = match set_idx {
            Some(i) => match record.get(i).filter(|s| !s.is_empty()) {
                Some(s) => s.to_string(),
                None => {
                    row_errors.push(RowError {
                        line,
                        message: "Missing set label.".to_string(),
                    });
                    continue;
                }
            },
            None => default_label.to_string(),
        };

        let slot = *set_lookup.entry(label.clone()).or_insert_with(|| {
            sets.push(MeasurementSet::new(label, Vec::new()));
            sets.len() - 1
        });
        sets[slot].values.push(value);
        rows_used += 1;
    }

    if rows_used == 0 {
        return Err(AppError::new(3, "No valid measurement rows in CSV."));
    }

    Ok(IngestedData {
        sets,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM on the first header, as spreadsheet exports often add one.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn parse_value(record: &StringRecord, idx: usize) -> Result<f64, String> {
    let raw = record.get(idx).unwrap_or("");
    if raw.is_empty() {
        return Err("Missing measurement value.".to_string());
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid measurement value '{raw}'.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_set_with_bom_header() {
        let csv = "\u{feff}Value\n1083\n1415\n1745\n2079\n";
        let data = read_measurements(csv.as_bytes(), &CsvLayout::default(), "depths").unwrap();
        assert_eq!(data.sets.len(), 1);
        assert_eq!(data.sets[0].label, "depths");
        assert_eq!(data.sets[0].values, vec![1083.0, 1415.0, 1745.0, 2079.0]);
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn groups_rows_by_set_in_first_seen_order() {
        let csv = "box,depth\nb,500\na,0\nb,100\na,215\na,800\n";
        let layout = CsvLayout {
            value_column: "depth".to_string(),
            set_column: Some("box".to_string()),
        };
        let data = read_measurements(csv.as_bytes(), &layout, "unused").unwrap();
        let labels: Vec<&str> = data.sets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(data.sets[0].values, vec![500.0, 100.0]);
        assert_eq!(data.sets[1].values, vec![0.0, 215.0, 800.0]);
        assert_eq!(data.rows_used, 5);
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "value\n1.0\nabc\ninf\n2.0\n";
        let data = read_measurements(csv.as_bytes(), &CsvLayout::default(), "x").unwrap();
        assert_eq!(data.sets[0].values, vec![1.0, 2.0]);
        assert_eq!(data.row_errors.len(), 2);
        assert_eq!(data.row_errors[0].line, 3);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = read_measurements("depth\n1\n".as_bytes(), &CsvLayout::default(), "x").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn all_rows_bad_is_an_error() {
        let err = read_measurements("value\nfoo\n".as_bytes(), &CsvLayout::default(), "x").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planes.csv");
        std::fs::write(&path, "value\n100\n500\n").unwrap();
        let data = load_measurements(&path, &CsvLayout::default()).unwrap();
        assert_eq!(data.sets[0].label, "planes");
        assert_eq!(data.sets[0].values, vec![100.0, 500.0]);
    }
}
