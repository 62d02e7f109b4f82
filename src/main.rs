use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxmicro::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxmicro::AppCommand {
    fn from(cmd: Commands) -> fxmicro::AppCommand {
        match cmd {
            Commands::Rates => fxmicro::AppCommand::Rates,
            Commands::Gateway => fxmicro::AppCommand::Gateway,
            Commands::Seed => fxmicro::AppCommand::Seed,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the rate table over HTTP
    Rates,
    /// Serve the authenticated conversion gateway
    Gateway,
    /// Write the bundled starter rates if no snapshot exists
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fxmicro::cli::setup::setup_at_path(path),
            None => fxmicro::cli::setup::setup(),
        },
        Some(cmd) => fxmicro::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
