//! Numeric sample with cached descriptive statistics
//!
//! A `NumericSample` is an ordered, non-empty sequence of finite values.
//! Non-finite entries are filtered at construction, and the descriptive
//! moments (mean, sample standard deviation, quartiles) are computed once
//! and cached so downstream analyses never re-derive them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The series contains no usable values after filtering out non-finite
/// entries. This is fatal: no partial statistics are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("series contains no usable values after filtering")]
pub struct EmptySeriesError;

/// Descriptive statistics of a sample, as a plain serializable record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Number of usable values
    pub count: usize,

    /// Arithmetic mean
    pub mean: f64,

    /// Sample standard deviation (ddof = 1; 0 when count <= 1)
    pub std_dev: f64,

    /// Smallest value
    pub min: f64,

    /// Largest value
    pub max: f64,

    /// 50th percentile
    pub median: f64,

    /// 25th percentile
    pub q1: f64,

    /// 75th percentile
    pub q3: f64,
}

/// An ordered sequence of finite measurements with cached moments.
///
/// Invariant: `count() >= 1`. The standard deviation is 0 when the sample
/// has a single value or all values are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSample {
    values: Vec<f64>,
    summary: SeriesSummary,
}

impl NumericSample {
    /// Build a sample from raw values, dropping non-finite entries.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self, EmptySeriesError> {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return Err(EmptySeriesError);
        }

        let count = values.len();
        let mean = mean(&values);
        let std_dev = sample_variance(&values).sqrt();

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        let summary = SeriesSummary {
            count,
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            median: percentile(&sorted, 0.50),
            q1: percentile(&sorted, 0.25),
            q3: percentile(&sorted, 0.75),
        };

        Ok(Self { values, summary })
    }

    /// The values in their original order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Descriptive statistics record.
    pub fn summary(&self) -> SeriesSummary {
        self.summary
    }

    pub fn count(&self) -> usize {
        self.summary.count
    }

    pub fn mean(&self) -> f64 {
        self.summary.mean
    }

    /// Sample standard deviation (ddof = 1; 0 when count <= 1).
    pub fn std_dev(&self) -> f64 {
        self.summary.std_dev
    }

    pub fn min(&self) -> f64 {
        self.summary.min
    }

    pub fn max(&self) -> f64 {
        self.summary.max
    }

    pub fn median(&self) -> f64 {
        self.summary.median
    }

    pub fn q1(&self) -> f64 {
        self.summary.q1
    }

    pub fn q3(&self) -> f64 {
        self.summary.q3
    }
}

/// Arithmetic mean. Caller guarantees a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with ddof = 1; defined as 0 for fewer than 2 values.
pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

/// Percentile by linear interpolation between order statistics
/// (the R-7 convention). `sorted` must be non-empty and ascending.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
