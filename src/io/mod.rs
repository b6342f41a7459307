//! File exchange - CSV readers and writers for measurement data

pub mod grid;
pub mod series;

pub use grid::{read_grid, write_template, GridReadError, GRID_HEADER};
pub use series::{read_series, SeriesReadError};
