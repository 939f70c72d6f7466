mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use librero_api::BooksClient;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = build_client(&cli.global)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &client, &cli.global).await
}

/// Build a `BooksClient` from the config file plus CLI flag overrides.
fn build_client(global: &cli::GlobalOpts) -> Result<BooksClient, CliError> {
    let mut server = librero_config::load_config_or_default().server;
    if let Some(url) = &global.server {
        server.url = url.clone();
    }
    if let Some(timeout) = global.timeout {
        server.timeout = timeout;
    }

    let url = server.base_url()?;
    BooksClient::new(url.clone(), server.timeout_duration())
        .map_err(|e| CliError::from_api(e, &url))
}
