//! Control limits for an individual-values run chart
//!
//! Center line at the sample mean with symmetric three-sigma limits. A
//! zero-sigma sample collapses all three lines onto the mean; that is valid
//! output, not an error.

use serde::{Deserialize, Serialize};

use crate::analysis::sample::NumericSample;

/// Center line and ±3-sigma limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Sample mean
    pub center_line: f64,

    /// center_line + 3 * sigma
    pub upper_control_limit: f64,

    /// center_line - 3 * sigma
    pub lower_control_limit: f64,
}

impl ControlLimits {
    pub fn from_sample(sample: &NumericSample) -> Self {
        let center = sample.mean();
        let spread = 3.0 * sample.std_dev();
        Self {
            center_line: center,
            upper_control_limit: center + spread,
            lower_control_limit: center - spread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_symmetric_about_mean() {
        let sample = NumericSample::new([8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let limits = ControlLimits::from_sample(&sample);

        assert!((limits.center_line - 10.0).abs() < 1e-12);
        let upper_gap = limits.upper_control_limit - limits.center_line;
        let lower_gap = limits.center_line - limits.lower_control_limit;
        assert!((upper_gap - lower_gap).abs() < 1e-12);
        assert!((upper_gap - 3.0 * sample.std_dev()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sigma_collapses_limits() {
        let sample = NumericSample::new([5.0, 5.0, 5.0]).unwrap();
        let limits = ControlLimits::from_sample(&sample);

        assert_eq!(limits.center_line, 5.0);
        assert_eq!(limits.upper_control_limit, 5.0);
        assert_eq!(limits.lower_control_limit, 5.0);
    }

    #[test]
    fn test_limits_roundtrip() {
        let sample = NumericSample::new([1.0, 2.0, 3.0]).unwrap();
        let limits = ControlLimits::from_sample(&sample);
        let yaml = serde_yml::to_string(&limits).unwrap();
        let parsed: ControlLimits = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, limits);
    }
}
