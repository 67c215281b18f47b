use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::sync::Arc;

use nexora_shell::app;
use nexora_shell::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Raw mode owns the terminal, so tracing goes to a file.
    let log = fs::File::create(&cli.log_file)
        .with_context(|| format!("opening log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexora_shell=debug".into()),
        )
        .with_writer(Arc::new(log))
        .with_ansi(false)
        .init();

    app::run(cli).await
}
