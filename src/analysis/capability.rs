//! Process capability analysis (Cp, Cpk, Pp, Ppk)
//!
//! Indices are reported relative to a resolved specification. With a single
//! flat sample there is no subgroup structure to estimate within-group
//! variation from, so the overall sample sigma is used for both the
//! short-term (Cp, Cpk) and long-term (Pp, Ppk) indices; Pp == Cp and
//! Ppk == Cpk by construction. This is a deliberate simplification, not a
//! short-term/long-term distinction.

use serde::{Deserialize, Serialize};

use crate::analysis::sample::NumericSample;
use crate::analysis::spec::{SpecMode, SpecificationLimits};

/// Interpretation category, derived solely from Cpk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityRating {
    /// Cpk >= 1.33
    Excellent,
    /// 1.0 <= Cpk < 1.33
    Acceptable,
    /// Cpk < 1.0
    Inadequate,
    /// Cpk not computable
    Undefined,
}

impl CapabilityRating {
    /// Boundary values belong to the higher category (closed lower bound).
    pub fn from_cpk(cpk: Option<f64>) -> Self {
        match cpk {
            Some(v) if v >= 1.33 => CapabilityRating::Excellent,
            Some(v) if v >= 1.0 => CapabilityRating::Acceptable,
            Some(_) => CapabilityRating::Inadequate,
            None => CapabilityRating::Undefined,
        }
    }
}

impl std::fmt::Display for CapabilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityRating::Excellent => write!(f, "excellent"),
            CapabilityRating::Acceptable => write!(f, "acceptable"),
            CapabilityRating::Inadequate => write!(f, "inadequate"),
            CapabilityRating::Undefined => write!(f, "undefined"),
        }
    }
}

/// Capability study result record.
///
/// Every index is absent when not computable (one-sided specification,
/// zero sigma, undefined mode) rather than a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityResult {
    /// Cp = (USL - LSL) / (6 * sigma). Requires both limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<f64>,

    /// Cpk = min(CPU, CPL); the one-sided ratio for one-sided modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpk: Option<f64>,

    /// Pp, equal to Cp for a single flat sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pp: Option<f64>,

    /// Ppk, equal to Cpk for a single flat sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppk: Option<f64>,

    /// Percentage of sample values conforming to the present limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_in_spec: Option<f64>,

    /// Interpretation of Cpk.
    pub rating: CapabilityRating,
}

/// Compute capability indices for a sample against a resolved specification.
pub fn analyze(sample: &NumericSample, spec: &SpecificationLimits) -> CapabilityResult {
    let mean = sample.mean();
    let sigma = sample.std_dev();
    let mode = spec.mode();

    // Division by zero sigma is meaningless; report absent indices.
    let (cp, cpk) = if sigma > 0.0 {
        match (spec.lower(), spec.upper()) {
            (Some(lsl), Some(usl)) => {
                let cp = (usl - lsl) / (6.0 * sigma);
                let cpu = (usl - mean) / (3.0 * sigma);
                let cpl = (mean - lsl) / (3.0 * sigma);
                (Some(cp), Some(cpu.min(cpl)))
            }
            (None, Some(usl)) => (None, Some((usl - mean) / (3.0 * sigma))),
            (Some(lsl), None) => (None, Some((mean - lsl) / (3.0 * sigma))),
            (None, None) => (None, None),
        }
    } else {
        (None, None)
    };

    let percent_in_spec = if mode == SpecMode::Undefined {
        None
    } else {
        let conforming = sample.values().iter().filter(|v| spec.contains(**v)).count();
        Some(conforming as f64 / sample.count() as f64 * 100.0)
    };

    CapabilityResult {
        cp,
        cpk,
        pp: cp,
        ppk: cpk,
        percent_in_spec,
        rating: CapabilityRating::from_cpk(cpk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(lower: Option<f64>, upper: Option<f64>) -> SpecificationLimits {
        SpecificationLimits::resolve(lower, upper, None, None).unwrap()
    }

    #[test]
    fn test_centered_bilateral_process() {
        // mean = 10, sigma = 1, LSL = 7, USL = 13:
        // Cp = 6/6 = 1.0, CPU = CPL = 1.0, Cpk = 1.0 -> acceptable
        let sample = NumericSample::new([8.0, 9.0, 10.0, 11.0, 12.0, 10.0, 10.0, 10.0]).unwrap();
        let scaled: Vec<f64> = {
            // Rescale to exactly sigma = 1 around mean 10
            let s = sample.std_dev();
            sample.values().iter().map(|v| 10.0 + (v - 10.0) / s).collect()
        };
        let sample = NumericSample::new(scaled).unwrap();
        assert!((sample.mean() - 10.0).abs() < 1e-12);
        assert!((sample.std_dev() - 1.0).abs() < 1e-12);

        let result = analyze(&sample, &spec(Some(7.0), Some(13.0)));
        assert!((result.cp.unwrap() - 1.0).abs() < 1e-12);
        assert!((result.cpk.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(result.pp, result.cp);
        assert_eq!(result.ppk, result.cpk);
        assert_eq!(result.rating, CapabilityRating::Acceptable);
    }

    #[test]
    fn test_zero_sigma_reports_absent_indices() {
        // All values identical: indices are absent, conformance still known.
        let sample = NumericSample::new([10.0, 10.0, 10.0, 10.0]).unwrap();
        let result = analyze(&sample, &spec(Some(5.0), Some(15.0)));

        assert_eq!(result.cp, None);
        assert_eq!(result.cpk, None);
        assert_eq!(result.pp, None);
        assert_eq!(result.ppk, None);
        assert_eq!(result.percent_in_spec, Some(100.0));
        assert_eq!(result.rating, CapabilityRating::Undefined);
    }

    #[test]
    fn test_cpk_is_min_of_one_sided_ratios() {
        // Off-center sample: Cpk < Cp
        let sample = NumericSample::new([11.0, 12.0, 13.0, 12.0, 12.0]).unwrap();
        let result = analyze(&sample, &spec(Some(7.0), Some(14.0)));

        let sigma = sample.std_dev();
        let cpu = (14.0 - sample.mean()) / (3.0 * sigma);
        let cpl = (sample.mean() - 7.0) / (3.0 * sigma);
        assert!((result.cpk.unwrap() - cpu.min(cpl)).abs() < 1e-12);
        assert!(result.cpk.unwrap() <= result.cp.unwrap());
    }

    #[test]
    fn test_upper_only_mode() {
        let sample = NumericSample::new([8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let result = analyze(&sample, &spec(None, Some(14.0)));

        assert_eq!(result.cp, None);
        assert_eq!(result.pp, None);
        let expected = (14.0 - sample.mean()) / (3.0 * sample.std_dev());
        assert!((result.cpk.unwrap() - expected).abs() < 1e-12);
        assert_eq!(result.ppk, result.cpk);
    }

    #[test]
    fn test_lower_only_mode() {
        let sample = NumericSample::new([8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let result = analyze(&sample, &spec(Some(6.0), None));

        assert_eq!(result.cp, None);
        let expected = (sample.mean() - 6.0) / (3.0 * sample.std_dev());
        assert!((result.cpk.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_mode_reports_nothing() {
        let sample = NumericSample::new([8.0, 9.0, 10.0]).unwrap();
        let result = analyze(&sample, &spec(None, None));

        assert_eq!(result.cp, None);
        assert_eq!(result.cpk, None);
        assert_eq!(result.percent_in_spec, None);
        assert_eq!(result.rating, CapabilityRating::Undefined);
    }

    #[test]
    fn test_percent_in_spec_counts_inclusive() {
        let sample = NumericSample::new([5.0, 7.0, 10.0, 15.0, 20.0]).unwrap();
        let result = analyze(&sample, &spec(Some(5.0), Some(15.0)));
        // 5, 7, 10, 15 conform; 20 does not
        assert!((result.percent_in_spec.unwrap() - 80.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_percent_in_spec() {
        let sample = NumericSample::new([5.0, 7.0, 10.0, 15.0]).unwrap();
        let result = analyze(&sample, &spec(None, Some(9.0)));
        assert!((result.percent_in_spec.unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_rating_boundaries_are_closed_below() {
        assert_eq!(
            CapabilityRating::from_cpk(Some(1.33)),
            CapabilityRating::Excellent
        );
        assert_eq!(
            CapabilityRating::from_cpk(Some(1.329999)),
            CapabilityRating::Acceptable
        );
        assert_eq!(
            CapabilityRating::from_cpk(Some(1.0)),
            CapabilityRating::Acceptable
        );
        assert_eq!(
            CapabilityRating::from_cpk(Some(0.999999)),
            CapabilityRating::Inadequate
        );
        assert_eq!(CapabilityRating::from_cpk(None), CapabilityRating::Undefined);
    }

    #[test]
    fn test_result_roundtrip() {
        let sample = NumericSample::new([8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let result = analyze(&sample, &spec(Some(7.0), Some(13.0)));

        let yaml = serde_yml::to_string(&result).unwrap();
        let parsed: CapabilityResult = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_absent_fields_are_omitted_from_output() {
        let sample = NumericSample::new([10.0, 10.0, 10.0]).unwrap();
        let result = analyze(&sample, &spec(Some(5.0), Some(15.0)));

        let yaml = serde_yml::to_string(&result).unwrap();
        assert!(!yaml.contains("cpk"));
        assert!(yaml.contains("percent_in_spec"));
    }
}
