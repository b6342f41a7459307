//! Command implementations

pub mod capability;
pub mod completions;
pub mod grr;
pub mod limits;
pub mod template;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Emit a report in a machine format when one was requested.
///
/// Returns `true` when the report was written (yaml/json), `false` when
/// the caller should render its human table instead.
pub(crate) fn emit_report<T: Serialize>(report: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(report).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(report).into_diagnostic()?
            );
            Ok(true)
        }
        OutputFormat::Auto => Ok(false),
    }
}
