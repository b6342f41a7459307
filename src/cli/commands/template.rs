//! Gauge study collection template command

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::io::write_template;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Output CSV file to create
    pub file: PathBuf,

    /// Number of operators (recommended 2-3)
    #[arg(long, default_value_t = 3)]
    pub operators: usize,

    /// Number of parts (recommended ~10)
    #[arg(long, default_value_t = 10)]
    pub parts: usize,

    /// Number of trials per operator/part (recommended 2-3)
    #[arg(long, default_value_t = 3)]
    pub trials: usize,
}

pub fn run(args: TemplateArgs, global: &GlobalOpts) -> Result<()> {
    let file = File::create(&args.file).into_diagnostic()?;
    write_template(BufWriter::new(file), args.operators, args.parts, args.trials)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Created template {} ({} operators x {} parts x {} trials)",
            style("✓").green(),
            args.file.display(),
            args.operators,
            args.parts,
            args.trials
        );
    }

    Ok(())
}
