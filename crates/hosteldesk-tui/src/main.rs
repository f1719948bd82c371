//! `hosteldesk` - Terminal dashboard for WorkNStay hostel owners.
//!
//! Built on [ratatui](https://ratatui.rs). Screens are navigable via
//! number keys (1-5): Dashboard, Bookings, My Hostel, Reviews, and
//! Tenants. Owner actions (approving bookings, replying to reviews,
//! terminating leases) run against a simulated backend and report back
//! through toast notifications.
//!
//! Logs are written to a file (default `/tmp/hosteldesk.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod seed;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hosteldesk_config::UiConfig;

use crate::app::App;
use crate::seed::SeedData;

/// Terminal dashboard for managing a WorkNStay hostel.
#[derive(Parser, Debug)]
#[command(name = "hosteldesk", version, about)]
struct Cli {
    /// Config file path (defaults to ~/.config/hosteldesk/config.toml)
    #[arg(short = 'c', long, env = "HOSTELDESK_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// JSON file with bookings, reviews, and tenants to load instead of
    /// the built-in sample data
    #[arg(long, env = "HOSTELDESK_SAMPLE_DATA")]
    sample_data: Option<PathBuf>,

    /// Log file path (defaults to /tmp/hosteldesk.log)
    #[arg(long, default_value = "/tmp/hosteldesk.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hosteldesk={log_level},hosteldesk_core={log_level},hosteldesk_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("hosteldesk.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Load the UI config. An explicitly chosen file must exist; the
/// canonical path may be absent, in which case defaults apply.
fn load_ui_config(cli: &Cli) -> Result<UiConfig> {
    let config = match &cli.config {
        Some(path) => hosteldesk_config::load_config_from(path)?,
        None => hosteldesk_config::load_config()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = load_ui_config(&cli)?;
    let seed = match &cli.sample_data {
        Some(path) => SeedData::from_file(path)?,
        None => SeedData::builtin(),
    };

    info!(
        bookings = seed.bookings.len(),
        reviews = seed.reviews.len(),
        tenants = seed.tenants.len(),
        "starting hosteldesk"
    );

    let mut app = App::new(&config, seed);
    app.run().await?;

    Ok(())
}
