//! Flat series CSV input
//!
//! Capability studies consume an ordered sequence of numbers. The reader
//! accepts a `Measurement` column (any casing), a headerless single-column
//! file, or any CSV where the first numeric column carries the data.
//! Blank and non-numeric cells are dropped; this reader is the upstream
//! "data ingestion" collaborator that pre-filters the sample.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesReadError {
    #[error("cannot read series file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a flat numeric series from a CSV file.
pub fn read_series(path: &Path) -> Result<Vec<f64>, SeriesReadError> {
    let file = File::open(path)?;
    read_series_from(BufReader::new(file))
}

/// Read a flat numeric series from any reader.
pub fn read_series_from<R: Read>(reader: R) -> Result<Vec<f64>, SeriesReadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut column: Option<usize> = None;

    for result in rdr.records() {
        let record = result?;

        let col = match column {
            Some(col) => col,
            None => {
                // First row decides the column: a named Measurement column,
                // else the first numeric field, else column 0 of later rows.
                if let Some(idx) = record
                    .iter()
                    .position(|f| f.eq_ignore_ascii_case("measurement"))
                {
                    column = Some(idx);
                    continue;
                }
                let idx = record
                    .iter()
                    .position(|f| f.parse::<f64>().is_ok())
                    .unwrap_or(0);
                column = Some(idx);
                idx
            }
        };

        if let Some(field) = record.get(col) {
            if let Ok(value) = field.parse::<f64>() {
                values.push(value);
            }
        }
    }

    Ok(values)
}
