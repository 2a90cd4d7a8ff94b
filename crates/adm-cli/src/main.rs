use anyhow::Context;
use clap::Parser;

use adm_config::AdmConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("admissions error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = AdmConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.client.base_url.clone_from(base_url);
    }

    commands::dispatch(cli.command, &config, cli.format).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ADMISSIONS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
