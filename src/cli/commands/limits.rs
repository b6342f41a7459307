//! Run chart control limits command

use chrono::{DateTime, Utc};
use console::style;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::control::ControlLimits;
use crate::analysis::sample::{NumericSample, SeriesSummary};
use crate::cli::helpers::fmt_value;
use crate::cli::GlobalOpts;
use crate::io::read_series;

use super::emit_report;

#[derive(clap::Args, Debug)]
pub struct LimitsArgs {
    /// CSV file with a flat numeric series
    pub file: PathBuf,
}

#[derive(Debug, serde::Serialize)]
struct LimitsReport {
    generated: DateTime<Utc>,
    file: String,
    series: SeriesSummary,
    control_limits: ControlLimits,
}

pub fn run(args: LimitsArgs, global: &GlobalOpts) -> Result<()> {
    let values = read_series(&args.file).map_err(|e| miette::miette!("{}", e))?;
    let sample = NumericSample::new(values)
        .map_err(|e| miette::miette!("{}: {}", args.file.display(), e))?;
    let limits = ControlLimits::from_sample(&sample);

    let report = LimitsReport {
        generated: Utc::now(),
        file: args.file.display().to_string(),
        series: sample.summary(),
        control_limits: limits,
    };

    if emit_report(&report, global.format)? {
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} {} (n = {})",
            style("Control limits:").bold(),
            args.file.display(),
            sample.count()
        );
    }

    let mut builder = Builder::default();
    builder.push_record(["Line", "Value"]);
    builder.push_record(["UCL".to_string(), fmt_value(limits.upper_control_limit)]);
    builder.push_record(["CL".to_string(), fmt_value(limits.center_line)]);
    builder.push_record(["LCL".to_string(), fmt_value(limits.lower_control_limit)]);

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");

    Ok(())
}
