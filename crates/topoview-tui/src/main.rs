//! `topoview-tui` — interactive terminal renderer for network topologies.
//!
//! Built on [ratatui](https://ratatui.rs) on top of `topoview-core`. Three
//! screens are navigable via number keys (1-3): the braille-canvas Graph
//! with click/drag selection and detail popups, the collapsible Tree, and
//! the node Inventory.
//!
//! Logs are written to a file (default `/tmp/topoview-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task re-reads the
//! topology source on the chosen auto-refresh interval.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use topoview_config::Config;
use topoview_core::{RefreshInterval, Theme, ViewMode};

use crate::app::{App, AppOptions};
use crate::data_bridge::TopologySource;

/// Interactive terminal view of a network topology.
#[derive(Parser, Debug)]
#[command(name = "topoview-tui", version, about)]
struct Cli {
    /// Topology file (JSON or YAML), overrides the profile
    #[arg(short = 't', long, env = "TOPOVIEW_TOPOLOGY")]
    topology: Option<PathBuf>,

    /// Use the built-in demo fabric instead of a file
    #[arg(long, conflicts_with = "topology")]
    demo: bool,

    /// Configuration profile to use
    #[arg(short = 'p', long, env = "TOPOVIEW_PROFILE")]
    profile: Option<String>,

    /// Initial view mode: physical or logical
    #[arg(long)]
    view: Option<ViewMode>,

    /// Initial theme: light or dark
    #[arg(long)]
    theme: Option<Theme>,

    /// Initial auto-refresh interval (off, 5s, 10s, 30s, 60s)
    #[arg(long)]
    refresh: Option<RefreshInterval>,

    /// Log file path (defaults to /tmp/topoview-tui.log)
    #[arg(long, default_value = "/tmp/topoview-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard until exit so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "topoview_tui={log_level},topoview_core={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("topoview-tui.log"));

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

/// Resolve startup options with precedence flag > profile > config defaults.
fn resolve_options(cli: &Cli, cfg: &Config) -> Result<AppOptions> {
    let profile = cfg.resolve_profile(cli.profile.as_deref())?;

    let source = if cli.demo {
        TopologySource::Demo
    } else if let Some(path) = &cli.topology {
        TopologySource::File(path.clone())
    } else if let Some((_, p)) = profile {
        TopologySource::File(p.topology.clone())
    } else {
        return Err(eyre!(
            "no topology source: pass --topology <file> or --demo, or add a profile to {}",
            topoview_config::config_path().display()
        ));
    };

    Ok(AppOptions {
        source,
        view: cli
            .view
            .or_else(|| profile.and_then(|(_, p)| p.view))
            .unwrap_or(cfg.defaults.view),
        theme: cli
            .theme
            .or_else(|| profile.and_then(|(_, p)| p.theme))
            .unwrap_or(cfg.defaults.theme),
        refresh: cli
            .refresh
            .or_else(|| profile.and_then(|(_, p)| p.refresh))
            .unwrap_or(cfg.defaults.refresh),
        popup: cfg.popup,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let cfg = topoview_config::load_config()?;
    let options = resolve_options(&cli, &cfg)?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        source = %options.source,
        view = %options.view,
        theme = %options.theme,
        refresh = %options.refresh,
        "starting topoview-tui"
    );

    let mut app = App::new(options);
    app.run().await?;

    Ok(())
}
