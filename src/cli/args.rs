//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    capability::CapabilityArgs, completions::CompletionsArgs, grr::GrrArgs, limits::LimitsArgs,
    template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "qst")]
#[command(author, version, about = "Quality Study Toolkit")]
#[command(
    long_about = "A Unix-style toolkit for process capability and gauge R&R analysis of plain-text CSV measurement data."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process capability study (Cp, Cpk, Pp, Ppk) on a flat series
    Capability(CapabilityArgs),

    /// Gauge R&R variance decomposition on an operator x part x trial grid
    Grr(GrrArgs),

    /// Center line and 3-sigma run chart limits for a series
    Limits(LimitsArgs),

    /// Write a blank gauge study collection template
    Template(TemplateArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled tables for terminals
    #[default]
    Auto,
    /// YAML report (full fidelity)
    Yaml,
    /// JSON report (for programming)
    Json,
}
