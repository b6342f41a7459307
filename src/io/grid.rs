//! Grid CSV exchange format
//!
//! The canonical gauge study exchange format is a four-column CSV with
//! header `Operator,Part,Trial,Measurement`, one row per measurement. The
//! same header is emitted by `write_template`, so exported collection
//! templates round-trip through the reader unchanged. Rows with a blank
//! measurement cell are skipped (an unfilled template row); a non-blank
//! cell that does not parse as a number is an error.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use thiserror::Error;

use crate::analysis::msa::MeasurementGrid;

/// Canonical grid CSV header, in column order.
pub const GRID_HEADER: [&str; 4] = ["Operator", "Part", "Trial", "Measurement"];

#[derive(Debug, Error)]
pub enum GridReadError {
    #[error("cannot read grid file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}' (expected header: Operator,Part,Trial,Measurement)")]
    MissingColumn(&'static str),

    #[error("row {row}: empty field '{column}'")]
    EmptyField { row: usize, column: &'static str },

    #[error("row {row}: invalid trial index '{value}'")]
    InvalidTrial { row: usize, value: String },

    #[error("row {row}: invalid measurement '{value}'")]
    InvalidMeasurement { row: usize, value: String },
}

/// Read a measurement grid from a CSV file.
pub fn read_grid(path: &Path) -> Result<MeasurementGrid, GridReadError> {
    let file = File::open(path)?;
    read_grid_from(BufReader::new(file))
}

/// Read a measurement grid from any reader.
pub fn read_grid_from<R: Read>(reader: R) -> Result<MeasurementGrid, GridReadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = GridColumns::locate(&headers)?;

    let mut grid = MeasurementGrid::new();
    for (row_idx, result) in rdr.records().enumerate() {
        // 1-based, counting the header row
        let row = row_idx + 2;
        let record = result?;

        let operator = required_field(&record, row, columns.operator, "Operator")?;
        let part = required_field(&record, row, columns.part, "Part")?;
        let trial = required_field(&record, row, columns.trial, "Trial")?;
        trial
            .parse::<u32>()
            .map_err(|_| GridReadError::InvalidTrial {
                row,
                value: trial.to_string(),
            })?;

        let measurement = record.get(columns.measurement).unwrap_or("").trim();
        if measurement.is_empty() {
            // Unfilled template row
            continue;
        }
        let value = measurement
            .parse::<f64>()
            .map_err(|_| GridReadError::InvalidMeasurement {
                row,
                value: measurement.to_string(),
            })?;

        grid.record(operator, part, value);
    }

    Ok(grid)
}

struct GridColumns {
    operator: usize,
    part: usize,
    trial: usize,
    measurement: usize,
}

impl GridColumns {
    fn locate(headers: &StringRecord) -> Result<Self, GridReadError> {
        let find = |name: &'static str| -> Result<usize, GridReadError> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(GridReadError::MissingColumn(name))
        };
        Ok(Self {
            operator: find("Operator")?,
            part: find("Part")?,
            trial: find("Trial")?,
            measurement: find("Measurement")?,
        })
    }
}

fn required_field<'r>(
    record: &'r StringRecord,
    row: usize,
    index: usize,
    column: &'static str,
) -> Result<&'r str, GridReadError> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GridReadError::EmptyField { row, column }),
    }
}

/// Write a blank collection template: one row per (operator, part, trial)
/// combination with the measurement cell left empty.
pub fn write_template<W: Write>(
    writer: W,
    operators: usize,
    parts: usize,
    trials: usize,
) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(GRID_HEADER)?;

    for operator in 1..=operators {
        for part in 1..=parts {
            for trial in 1..=trials {
                wtr.write_record([
                    format!("Operator {operator}"),
                    format!("Part {part}"),
                    trial.to_string(),
                    String::new(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_canonical_grid() {
        let csv = "Operator,Part,Trial,Measurement\n\
                   A,P1,1,10.1\n\
                   A,P1,2,10.2\n\
                   B,P1,1,10.0\n\
                   B,P1,2,10.3\n";
        let grid = read_grid_from(csv.as_bytes()).unwrap();
        assert_eq!(grid.measurement_count(), 4);
        assert_eq!(grid.operator_count(), 2);
        assert_eq!(grid.part_count(), 1);
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let csv = "operator,part,trial,measurement\nA,P1,1,10.1\n";
        let grid = read_grid_from(csv.as_bytes()).unwrap();
        assert_eq!(grid.measurement_count(), 1);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "Operator,Part,Measurement\nA,P1,10.1\n";
        let err = read_grid_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GridReadError::MissingColumn("Trial")));
    }

    #[test]
    fn test_blank_measurement_rows_are_skipped() {
        let csv = "Operator,Part,Trial,Measurement\n\
                   A,P1,1,10.1\n\
                   A,P1,2,\n";
        let grid = read_grid_from(csv.as_bytes()).unwrap();
        assert_eq!(grid.measurement_count(), 1);
    }

    #[test]
    fn test_invalid_measurement_reports_row() {
        let csv = "Operator,Part,Trial,Measurement\n\
                   A,P1,1,10.1\n\
                   A,P1,2,abc\n";
        let err = read_grid_from(csv.as_bytes()).unwrap_err();
        match err {
            GridReadError::InvalidMeasurement { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_trial_reports_row() {
        let csv = "Operator,Part,Trial,Measurement\nA,P1,x,10.1\n";
        let err = read_grid_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GridReadError::InvalidTrial { row: 2, .. }));
    }

    #[test]
    fn test_empty_operator_is_rejected() {
        let csv = "Operator,Part,Trial,Measurement\n,P1,1,10.1\n";
        let err = read_grid_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            GridReadError::EmptyField {
                row: 2,
                column: "Operator"
            }
        ));
    }

    #[test]
    fn test_template_round_trips_through_reader() {
        let mut buf = Vec::new();
        write_template(&mut buf, 2, 3, 2).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("Operator,Part,Trial,Measurement\n"));
        // 2 x 3 x 2 rows plus header
        assert_eq!(text.lines().count(), 13);

        // A blank template parses to an empty grid.
        let grid = read_grid_from(buf.as_slice()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_filled_template_parses() {
        let mut buf = Vec::new();
        write_template(&mut buf, 1, 2, 1).unwrap();
        let filled = String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|line| {
                if line.ends_with(',') {
                    format!("{line}5.0")
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let grid = read_grid_from(filled.as_bytes()).unwrap();
        assert_eq!(grid.measurement_count(), 2);
        assert_eq!(grid.part_count(), 2);
    }
}
