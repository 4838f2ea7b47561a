mod cli;
mod commands;
mod config;
mod error;
mod input;

use clap::Parser;
use cli::{Cli, Commands};
use error::exit_with_error;

fn init_tracing(cli: &Cli) {
    // --quiet   → off
    // --verbose → RUST_LOG if set, else "info"
    // default   → off, so RUST_LOG alone never mixes log lines into output
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Only the flag and NO_COLOR turn color off; stdout being piped does not,
    // since errors and warnings go to stderr.
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    let settings = config::Settings::load(cli.config_file.as_deref())?;

    match cli.command {
        Commands::Init { force } => commands::init::run(force),

        Commands::Transform { args, output } => {
            commands::transform::run(&args, output.as_deref(), &settings)
        }

        Commands::Generate { args, output } => {
            commands::generate::run(&args, output.as_deref(), &settings)
        }

        Commands::Execute {
            mapping,
            csv,
            delimiter,
            base_iri,
            output,
        } => commands::execute::run(
            &mapping,
            &csv,
            delimiter,
            base_iri.as_deref(),
            output.as_deref(),
            &settings,
        ),

        Commands::Extract {
            mapping,
            csv,
            delimiter,
            strict,
            output,
        } => commands::extract::run(
            &mapping,
            &csv,
            delimiter,
            strict || settings.strict_extraction,
            output.as_deref(),
        ),
    }
}
