//! Gauge R&R variance decomposition (MSA engine)
//!
//! Decomposes the total variation observed in an operator x part x trial
//! measurement grid into repeatability (equipment), reproducibility
//! (operator), and part-to-part components using method-of-moments
//! estimates. This is not a mixed-model ANOVA: the three components are
//! independent moment estimates, so their percent contributions can sum
//! past 100% on small grids. `renormalize` enforces the <= 100% invariant
//! in exactly one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::sample::{mean, sample_variance, EmptySeriesError};

/// Declared shape of a gauge study. Recorded for reporting; the
/// decomposition works from whatever data the grid actually holds.
///
/// Recommended practice: 2-3 operators, ~10 parts, 2-3 trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrrStudyDesign {
    pub operator_count: usize,
    pub part_count: usize,
    pub trial_count: usize,
}

impl GrrStudyDesign {
    pub fn new(operator_count: usize, part_count: usize, trial_count: usize) -> Self {
        Self {
            operator_count,
            part_count,
            trial_count,
        }
    }

    /// Derive the design from the observed grid shape.
    pub fn from_grid(grid: &MeasurementGrid) -> Self {
        Self {
            operator_count: grid.operator_count(),
            part_count: grid.part_count(),
            trial_count: grid.max_trials(),
        }
    }
}

/// Measurements keyed by (operator, part), one entry per trial.
///
/// Cells with fewer trials than the declared design are tolerated; they
/// degrade the repeatability estimate rather than invalidating the study.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementGrid {
    cells: BTreeMap<(String, String), Vec<f64>>,
}

impl MeasurementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one measurement. Non-finite values are dropped.
    pub fn record(&mut self, operator: impl Into<String>, part: impl Into<String>, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.cells
            .entry((operator.into(), part.into()))
            .or_default()
            .push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of recorded measurements.
    pub fn measurement_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Number of distinct operators.
    pub fn operator_count(&self) -> usize {
        let mut operators: Vec<&str> = self.cells.keys().map(|(op, _)| op.as_str()).collect();
        operators.dedup();
        operators.len()
    }

    /// Number of distinct parts.
    pub fn part_count(&self) -> usize {
        let parts: std::collections::BTreeSet<&str> =
            self.cells.keys().map(|(_, part)| part.as_str()).collect();
        parts.len()
    }

    /// Largest trial count seen in any cell.
    pub fn max_trials(&self) -> usize {
        self.cells.values().map(Vec::len).max().unwrap_or(0)
    }

    fn all_values(&self) -> Vec<f64> {
        self.cells.values().flatten().copied().collect()
    }
}

/// Variance decomposition result record.
///
/// Component fields are absent when the grid carries no signal for them
/// (too few operators, parts, or repeated trials), so callers can tell
/// "no signal" from "computed zero". Percent fields are absent when the
/// total variance is degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceComponents {
    /// Within-cell (equipment) variance, averaged over cells with >= 2 trials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeatability_variance: Option<f64>,

    /// Between-operator variance within parts, averaged over parts
    /// measured by >= 2 operators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproducibility_variance: Option<f64>,

    /// repeatability + reproducibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rr_variance: Option<f64>,

    /// Variance of per-part means across parts. Requires >= 2 parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_variance: Option<f64>,

    /// Pooled variance of every measurement, ignoring grouping.
    pub total_variance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeatability_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproducibility_percent: Option<f64>,

    /// repeatability_percent + reproducibility_percent, post-renormalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rr_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_percent: Option<f64>,

    /// Total variance <= 0: no variation detected, percent fields absent.
    pub degenerate: bool,

    /// Fewer than 2 operators or 2 parts: partial decomposition.
    pub incomplete: bool,
}

/// Decompose a measurement grid into variance components.
///
/// Fails only when the grid holds no measurements at all. Structural
/// shortfalls (single operator, single part, unrepeated cells) produce a
/// partial result with the affected fields absent and `incomplete` set.
pub fn decompose(grid: &MeasurementGrid) -> Result<VarianceComponents, EmptySeriesError> {
    let all = grid.all_values();
    if all.is_empty() {
        return Err(EmptySeriesError);
    }

    let total_variance = sample_variance(&all).max(0.0);

    // Step 1: within-cell variance across trials, cells with >= 2 trials.
    let cell_variances: Vec<f64> = grid
        .cells
        .values()
        .filter(|trials| trials.len() >= 2)
        .map(|trials| sample_variance(trials))
        .collect();
    let repeatability_variance = if cell_variances.is_empty() {
        None
    } else {
        Some(mean(&cell_variances).max(0.0))
    };

    // Step 2: variance of per-operator cell means within each part,
    // averaged over parts seen by >= 2 operators.
    let mut means_by_part: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ((_, part), trials) in &grid.cells {
        means_by_part.entry(part.as_str()).or_default().push(mean(trials));
    }
    let operator_spreads: Vec<f64> = means_by_part
        .values()
        .filter(|cell_means| cell_means.len() >= 2)
        .map(|cell_means| sample_variance(cell_means))
        .collect();
    let reproducibility_variance = if operator_spreads.is_empty() {
        None
    } else {
        Some(mean(&operator_spreads).max(0.0))
    };

    // Step 3: variance of part means (pooled across operators and trials).
    let mut values_by_part: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ((_, part), trials) in &grid.cells {
        values_by_part
            .entry(part.as_str())
            .or_default()
            .extend_from_slice(trials);
    }
    let part_means: Vec<f64> = values_by_part.values().map(|values| mean(values)).collect();
    let part_variance = if part_means.len() >= 2 {
        Some(sample_variance(&part_means).max(0.0))
    } else {
        None
    };

    let rr_variance = match (repeatability_variance, reproducibility_variance) {
        (Some(r), Some(o)) => Some(r + o),
        _ => None,
    };

    let incomplete = grid.operator_count() < 2 || grid.part_count() < 2;
    let degenerate = total_variance <= 0.0;

    let percent_of_total = |variance: Option<f64>| -> Option<f64> {
        if degenerate {
            None
        } else {
            variance.map(|v| v / total_variance * 100.0)
        }
    };

    let components = VarianceComponents {
        repeatability_variance,
        reproducibility_variance,
        rr_variance,
        part_variance,
        total_variance,
        repeatability_percent: percent_of_total(repeatability_variance),
        reproducibility_percent: percent_of_total(reproducibility_variance),
        rr_percent: None,
        part_percent: percent_of_total(part_variance),
        degenerate,
        incomplete,
    };

    Ok(renormalize(components))
}

/// Enforce the "percent contributions sum to <= 100" invariant.
///
/// The moment estimates are independent, so on small grids their percent
/// contributions can overshoot 100. When they do, all three are rescaled
/// proportionally to sum to exactly 100. `rr_percent` is recomputed from
/// the (possibly rescaled) repeatability and reproducibility percentages
/// so that rr = repeatability + reproducibility holds exactly.
pub(crate) fn renormalize(mut components: VarianceComponents) -> VarianceComponents {
    let sum = components.repeatability_percent.unwrap_or(0.0)
        + components.reproducibility_percent.unwrap_or(0.0)
        + components.part_percent.unwrap_or(0.0);

    if sum > 100.0 {
        let scale = 100.0 / sum;
        components.repeatability_percent = components.repeatability_percent.map(|p| p * scale);
        components.reproducibility_percent =
            components.reproducibility_percent.map(|p| p * scale);
        components.part_percent = components.part_percent.map(|p| p * scale);
    }

    components.rr_percent = match (
        components.repeatability_percent,
        components.reproducibility_percent,
    ) {
        (Some(r), Some(o)) => Some(r + o),
        _ => None,
    };

    components
}
