//! Shared helper functions for CLI commands

/// Format a value for table output with four decimal places.
pub fn fmt_value(value: f64) -> String {
    format!("{value:.4}")
}

/// Format an optional value, rendering "not computable" distinctly from
/// a computed zero.
pub fn fmt_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => fmt_value(v),
        None => "n/a".to_string(),
    }
}

/// Format an optional percentage with one decimal place.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(1.0), "1.0000");
        assert_eq!(fmt_value(0.123456), "0.1235");
    }

    #[test]
    fn test_fmt_optional_distinguishes_absent_from_zero() {
        assert_eq!(fmt_optional(Some(0.0)), "0.0000");
        assert_eq!(fmt_optional(None), "n/a");
    }

    #[test]
    fn test_fmt_percent() {
        assert_eq!(fmt_percent(Some(12.34)), "12.3%");
        assert_eq!(fmt_percent(None), "n/a");
    }
}
