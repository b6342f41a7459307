use clap::Parser;
use miette::Result;
use qst::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Capability(args) => qst::cli::commands::capability::run(args, &global),
        Commands::Grr(args) => qst::cli::commands::grr::run(args, &global),
        Commands::Limits(args) => qst::cli::commands::limits::run(args, &global),
        Commands::Template(args) => qst::cli::commands::template::run(args, &global),
        Commands::Completions(args) => qst::cli::commands::completions::run(args),
    }
}
