//! Specification limit resolution
//!
//! Normalizes user-supplied lower/upper/target limits into a validated
//! specification. The mode (bilateral, one-sided, undefined) is derived
//! from which limits are present, never stored redundantly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Derived specification mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecMode {
    /// Both limits present
    Bilateral,
    /// Upper limit only
    UpperOnly,
    /// Lower limit only
    LowerOnly,
    /// No limits
    Undefined,
}

impl std::fmt::Display for SpecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecMode::Bilateral => write!(f, "bilateral"),
            SpecMode::UpperOnly => write!(f, "upper_only"),
            SpecMode::LowerOnly => write!(f, "lower_only"),
            SpecMode::Undefined => write!(f, "undefined"),
        }
    }
}

/// Malformed specification limits. Fatal: no analysis is performed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSpecificationError {
    #[error("upper limit ({upper}) must be greater than lower limit ({lower})")]
    LimitsInverted { lower: f64, upper: f64 },

    #[error("requested mode '{mode}' requires a {which} limit")]
    MissingLimit { mode: SpecMode, which: &'static str },

    #[error("specification limits must be finite")]
    NonFiniteLimit,
}

/// Validated specification limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificationLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lower: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    upper: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<f64>,
}

impl SpecificationLimits {
    /// Resolve raw limits into a validated specification.
    ///
    /// `requested` is a caller hint: when present, the named mode's limits
    /// must exist. When absent, the mode is derived from whichever limits
    /// are supplied (possibly `Undefined`).
    pub fn resolve(
        lower: Option<f64>,
        upper: Option<f64>,
        target: Option<f64>,
        requested: Option<SpecMode>,
    ) -> Result<Self, InvalidSpecificationError> {
        for limit in [lower, upper, target].into_iter().flatten() {
            if !limit.is_finite() {
                return Err(InvalidSpecificationError::NonFiniteLimit);
            }
        }

        if let (Some(l), Some(u)) = (lower, upper) {
            if u <= l {
                return Err(InvalidSpecificationError::LimitsInverted { lower: l, upper: u });
            }
        }

        match requested {
            Some(mode @ (SpecMode::Bilateral | SpecMode::LowerOnly)) if lower.is_none() => {
                return Err(InvalidSpecificationError::MissingLimit {
                    mode,
                    which: "lower",
                });
            }
            Some(mode @ (SpecMode::Bilateral | SpecMode::UpperOnly)) if upper.is_none() => {
                return Err(InvalidSpecificationError::MissingLimit {
                    mode,
                    which: "upper",
                });
            }
            _ => {}
        }

        Ok(Self {
            lower,
            upper,
            target,
        })
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Derived mode from which limits are present.
    pub fn mode(&self) -> SpecMode {
        match (self.lower, self.upper) {
            (Some(_), Some(_)) => SpecMode::Bilateral,
            (None, Some(_)) => SpecMode::UpperOnly,
            (Some(_), None) => SpecMode::LowerOnly,
            (None, None) => SpecMode::Undefined,
        }
    }

    /// Whether a value conforms to the present limits (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        if let Some(l) = self.lower {
            if value < l {
                return false;
            }
        }
        if let Some(u) = self.upper {
            if value > u {
                return false;
            }
        }
        true
    }
}
