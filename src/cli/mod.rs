//! pm2kit CLI - Command-line interface for PM2 asset tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "pm2kit")]
#[command(about = "pm2kit: Premier Manager 2 asset tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the pm2kit CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
