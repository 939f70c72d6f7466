//! `librero-tui` — Terminal UI for managing a book collection server.
//!
//! Built on [ratatui](https://ratatui.rs). A single screen shows the book
//! list; `n`/`e` open a form overlay for create/edit, `d` deletes after a
//! confirmation dialog, `r` reloads from the server.
//!
//! Logs are written to a file (default `/tmp/librero-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod books;
mod event;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use librero_api::BooksClient;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Terminal UI for managing a book collection.
#[derive(Parser, Debug)]
#[command(name = "librero-tui", version, about)]
struct Cli {
    /// Server base URL (e.g., http://localhost:8080)
    #[arg(short = 's', long, env = "LIBRERO_SERVER_URL")]
    server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "LIBRERO_SERVER_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/librero-tui.log)
    #[arg(long, default_value = "/tmp/librero-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("librero_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("librero-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`BooksClient`] from CLI flags, falling back to the config file.
fn build_client(cli: &Cli) -> Result<BooksClient> {
    let mut server = librero_config::load_config_or_default().server;
    if let Some(url) = &cli.server {
        server.url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        server.timeout = timeout;
    }

    Ok(BooksClient::new(
        server.base_url()?,
        server.timeout_duration(),
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let client = build_client(&cli)?;
    info!(server = %client.base_url(), "starting librero-tui");

    let mut app = App::new(client);
    app.run().await?;

    Ok(())
}
