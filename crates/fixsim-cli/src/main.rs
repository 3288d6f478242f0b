//! Fixsim CLI - command-line interface for fixed-point DSP simulation.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fixsim")]
#[command(author, version, about = "Fixed-point DSP simulation CLI", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation project and report fidelity metrics
    Run(commands::run::RunArgs),

    /// Power spectrum of a generated signal or a WAV file
    Psd(commands::psd::PsdArgs),

    /// Magnitude response of a coefficient set
    Response(commands::response::ResponseArgs),

    /// Quantize values to a fixed-point width and back
    Quantize(commands::quantize::QuantizeArgs),

    /// Sweep data/coefficient widths for a project's filter
    Sweep(commands::sweep::SweepArgs),

    /// List or export the bundled example projects
    Examples(commands::examples::ExamplesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Psd(args) => commands::psd::run(args),
        Commands::Response(args) => commands::response::run(args),
        Commands::Quantize(args) => commands::quantize::run(args),
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Examples(args) => commands::examples::run(args),
    }
}
