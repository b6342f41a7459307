//! Gauge R&R study command

use chrono::{DateTime, Utc};
use console::style;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::msa::{decompose, GrrStudyDesign, VarianceComponents};
use crate::cli::helpers::{fmt_optional, fmt_percent, fmt_value};
use crate::cli::GlobalOpts;
use crate::io::read_grid;

use super::emit_report;

#[derive(clap::Args, Debug)]
pub struct GrrArgs {
    /// Grid CSV file (Operator,Part,Trial,Measurement)
    pub file: PathBuf,

    /// Declared operator count (defaults to the observed count)
    #[arg(long)]
    pub operators: Option<usize>,

    /// Declared part count (defaults to the observed count)
    #[arg(long)]
    pub parts: Option<usize>,

    /// Declared trial count (defaults to the observed maximum)
    #[arg(long)]
    pub trials: Option<usize>,
}

/// Full gauge study report as serialized for yaml/json output.
#[derive(Debug, serde::Serialize)]
struct GrrReport {
    generated: DateTime<Utc>,
    file: String,
    design: GrrStudyDesign,
    components: VarianceComponents,
}

/// Display band for the R&R contribution, applied by this calling layer:
/// <10% excellent, 10-30% acceptable, >=30% inadequate.
fn rr_band(rr_percent: f64) -> &'static str {
    if rr_percent < 10.0 {
        "excellent"
    } else if rr_percent < 30.0 {
        "acceptable"
    } else {
        "inadequate"
    }
}

pub fn run(args: GrrArgs, global: &GlobalOpts) -> Result<()> {
    let grid = read_grid(&args.file).map_err(|e| miette::miette!("{}", e))?;
    let components = decompose(&grid)
        .map_err(|e| miette::miette!("{}: {}", args.file.display(), e))?;

    let observed = GrrStudyDesign::from_grid(&grid);
    let design = GrrStudyDesign::new(
        args.operators.unwrap_or(observed.operator_count),
        args.parts.unwrap_or(observed.part_count),
        args.trials.unwrap_or(observed.trial_count),
    );

    let report = GrrReport {
        generated: Utc::now(),
        file: args.file.display().to_string(),
        design,
        components: components.clone(),
    };

    if emit_report(&report, global.format)? {
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} {} ({} operators x {} parts x {} trials)",
            style("Gauge R&R study:").bold(),
            args.file.display(),
            design.operator_count,
            design.part_count,
            design.trial_count
        );
    }

    let mut builder = Builder::default();
    builder.push_record(["Component", "Variance", "% Contribution"]);
    builder.push_record([
        "Repeatability (EV)".to_string(),
        fmt_optional(components.repeatability_variance),
        fmt_percent(components.repeatability_percent),
    ]);
    builder.push_record([
        "Reproducibility (AV)".to_string(),
        fmt_optional(components.reproducibility_variance),
        fmt_percent(components.reproducibility_percent),
    ]);
    builder.push_record([
        "Gauge R&R".to_string(),
        fmt_optional(components.rr_variance),
        fmt_percent(components.rr_percent),
    ]);
    builder.push_record([
        "Part-to-Part (PV)".to_string(),
        fmt_optional(components.part_variance),
        fmt_percent(components.part_percent),
    ]);
    builder.push_record([
        "Total".to_string(),
        fmt_value(components.total_variance),
        String::new(),
    ]);

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");

    if let Some(rr) = components.rr_percent {
        println!(
            "Measurement system: {} ({} of total variation)",
            style(rr_band(rr)).bold(),
            fmt_percent(Some(rr))
        );
    }

    if components.degenerate && !global.quiet {
        println!(
            "{} no variation detected; percent contributions are not computable",
            style("warning:").yellow().bold()
        );
    }
    if components.incomplete && !global.quiet {
        println!(
            "{} fewer than 2 operators or 2 parts; decomposition is partial",
            style("warning:").yellow().bold()
        );
    }

    Ok(())
}
