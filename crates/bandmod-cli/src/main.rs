//! bandmod CLI - render audio files through the band splitter / mod filter engine.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bandmod")]
#[command(author, version, about = "Four-band splitter and modulated filter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the engine
    Process(commands::process::ProcessArgs),

    /// Write the default engine config as TOML
    InitConfig(commands::init_config::InitConfigArgs),

    /// Load a config and report out-of-range parameters
    CheckConfig(commands::check_config::CheckConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::InitConfig(args) => commands::init_config::run(args),
        Commands::CheckConfig(args) => commands::check_config::run(args),
    }
}
