//! pm2kit command-line binary

fn main() -> anyhow::Result<()> {
    pm2kit::cli::run_cli()
}
