//! Process capability study command

use chrono::{DateTime, Utc};
use console::style;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::capability::{self, CapabilityResult};
use crate::analysis::control::ControlLimits;
use crate::analysis::sample::{NumericSample, SeriesSummary};
use crate::analysis::spec::{SpecMode, SpecificationLimits};
use crate::cli::helpers::{fmt_optional, fmt_percent, fmt_value};
use crate::cli::GlobalOpts;
use crate::io::read_series;

use super::emit_report;

#[derive(clap::Args, Debug)]
pub struct CapabilityArgs {
    /// CSV file with a flat numeric series (a Measurement column, or the
    /// first numeric column)
    pub file: PathBuf,

    /// Lower specification limit
    #[arg(long)]
    pub lsl: Option<f64>,

    /// Upper specification limit
    #[arg(long)]
    pub usl: Option<f64>,

    /// Target value (recorded in the report)
    #[arg(long)]
    pub target: Option<f64>,

    /// Require a specification mode (defaults to whichever limits are given)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Bilateral,
    Upper,
    Lower,
}

impl From<ModeArg> for SpecMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Bilateral => SpecMode::Bilateral,
            ModeArg::Upper => SpecMode::UpperOnly,
            ModeArg::Lower => SpecMode::LowerOnly,
        }
    }
}

/// Full capability report as serialized for yaml/json output.
#[derive(Debug, serde::Serialize)]
struct CapabilityReport {
    generated: DateTime<Utc>,
    file: String,
    mode: SpecMode,
    specification: SpecificationLimits,
    series: SeriesSummary,
    capability: CapabilityResult,
    control_limits: ControlLimits,
}

pub fn run(args: CapabilityArgs, global: &GlobalOpts) -> Result<()> {
    let values = read_series(&args.file).map_err(|e| miette::miette!("{}", e))?;
    let sample = NumericSample::new(values)
        .map_err(|e| miette::miette!("{}: {}", args.file.display(), e))?;
    let spec = SpecificationLimits::resolve(
        args.lsl,
        args.usl,
        args.target,
        args.mode.map(Into::into),
    )
    .map_err(|e| miette::miette!("{}", e))?;

    let result = capability::analyze(&sample, &spec);
    let limits = ControlLimits::from_sample(&sample);
    let summary = sample.summary();

    let report = CapabilityReport {
        generated: Utc::now(),
        file: args.file.display().to_string(),
        mode: spec.mode(),
        specification: spec,
        series: summary,
        capability: result.clone(),
        control_limits: limits,
    };

    if emit_report(&report, global.format)? {
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} {} ({} mode, n = {})",
            style("Capability study:").bold(),
            args.file.display(),
            spec.mode(),
            summary.count
        );
    }

    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Mean".to_string(), fmt_value(summary.mean)]);
    builder.push_record(["Std dev".to_string(), fmt_value(summary.std_dev)]);
    builder.push_record(["Min".to_string(), fmt_value(summary.min)]);
    builder.push_record(["Median".to_string(), fmt_value(summary.median)]);
    builder.push_record(["Max".to_string(), fmt_value(summary.max)]);
    builder.push_record(["Cp".to_string(), fmt_optional(result.cp)]);
    builder.push_record(["Cpk".to_string(), fmt_optional(result.cpk)]);
    builder.push_record(["Pp".to_string(), fmt_optional(result.pp)]);
    builder.push_record(["Ppk".to_string(), fmt_optional(result.ppk)]);
    builder.push_record(["In spec".to_string(), fmt_percent(result.percent_in_spec)]);
    builder.push_record(["CL".to_string(), fmt_value(limits.center_line)]);
    builder.push_record(["UCL".to_string(), fmt_value(limits.upper_control_limit)]);
    builder.push_record(["LCL".to_string(), fmt_value(limits.lower_control_limit)]);
    builder.push_record(["Rating".to_string(), result.rating.to_string()]);

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");

    if summary.std_dev == 0.0 && !global.quiet {
        println!(
            "{} zero standard deviation; capability indices are not computable",
            style("note:").yellow().bold()
        );
    }

    Ok(())
}
