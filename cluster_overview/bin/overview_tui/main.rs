/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Interactive TUI for watching cluster membership.
//!
//! Polls a snapshot source (an HTTP endpoint serving the JSON cluster
//! overview, a JSON file, or nothing for a standalone server) on a
//! background task and shows the members as leader / followers / read
//! replicas. The operator moves a cursor with j/k/g/G and pins palette
//! highlights with +/-.
//!
//! Invariants the shell keeps on top of the library's:
//! - **Single owner**: only the UI task touches `App.view`; the poller
//!   just sends `SnapshotEvent`s.
//! - **Stale but visible**: a failed fetch sets the header error and
//!   leaves the last good topology on screen; the next good snapshot
//!   clears the error.
//! - **Draw on demand**: frames are drawn only after the view's redraw
//!   signal, a state-changing key, or a resize.
//!
//! ```bash
//! cluster_overview_tui --addr localhost:7687 --url http://localhost:7474/cluster/overview
//! cluster_overview_tui --addr localhost:7687 --snapshot-file overview.json --log-file /tmp/overview.log
//! ```

mod actions;
mod app;
mod fetch;
mod render;
mod theme;

use std::fs::File;
use std::io;
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) use actions::*;
use anyhow::Context;
pub(crate) use app::*;
use clap::Parser;
use cluster_overview::OverviewConfig;
use cluster_overview::SnapshotFeed;
use cluster_overview::SnapshotSource;
use cluster_overview::StandaloneSource;
use cluster_overview::spawn_poller;
use crossterm::ExecutableCommand;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
pub(crate) use fetch::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
pub(crate) use theme::*;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// How long to wait for the first snapshot before showing the UI
/// anyway.
const FIRST_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

// Terminal setup / teardown

/// Put the terminal into "TUI mode".
///
/// Enables raw mode, switches to the alternate screen, and clears it,
/// returning a `ratatui::Terminal` backed by crossterm.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal back to normal “shell mode”.
///
/// Disables raw mode, leaves the alternate screen, and re-enables the
/// cursor.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install the global tracing subscriber.
///
/// The UI owns stdout, so logs go to `--log-file` when given and are
/// discarded otherwise.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::sink).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))
}

/// Start the poller for whichever source `args` selects.
///
/// Returns the feed, the poller task, and a label for the header.
fn start_feed(args: &Args, config: &OverviewConfig) -> (SnapshotFeed, JoinHandle<()>, String) {
    let interval = config.refresh_interval;
    if let Some(url) = &args.url {
        let source = HttpSnapshotSource::new(reqwest::Client::new(), url);
        let label = source.describe();
        let (feed, handle) = spawn_poller(source, interval);
        (feed, handle, label)
    } else if let Some(path) = &args.snapshot_file {
        let source = FileSnapshotSource::new(path.clone());
        let label = source.describe();
        let (feed, handle) = spawn_poller(source, interval);
        (feed, handle, label)
    } else {
        let (feed, handle) = spawn_poller(StandaloneSource, interval);
        (feed, handle, "standalone".to_string())
    }
}

// Main loop

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !io::stdout().is_terminal() {
        eprintln!("This TUI requires a real terminal.");
        return Ok(());
    }

    init_logging(&args)?;

    let config = OverviewConfig::new(args.addr.clone())
        .with_refresh_interval(Duration::from_millis(args.refresh_ms.max(1)));
    let (mut feed, poller, source_label) = start_feed(&args, &config);
    tracing::info!(own_address = %config.own_address, source = %source_label, "starting cluster overview");

    let mut app = App::new(config, source_label, args.theme, args.lang);

    // Show an indicatif spinner on stderr while waiting for the first
    // snapshot. This runs before the alternate screen so it's visible
    // as a normal terminal line.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("spinner template")?,
    );
    spinner.set_message(format!(
        "{} — Waiting for topology from {} ...",
        app.theme.labels.app_name, app.source_label
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    match tokio::time::timeout(FIRST_SNAPSHOT_TIMEOUT, feed.next()).await {
        Ok(Some(event)) => app.apply(event),
        Ok(None) => tracing::warn!("snapshot feed closed before first snapshot"),
        Err(_) => tracing::warn!("no snapshot within {:?}", FIRST_SNAPSHOT_TIMEOUT),
    }

    spinner.finish_and_clear();

    let mut terminal = setup_terminal().context("entering TUI mode")?;
    let result = run_app(&mut terminal, feed, app).await;
    restore_terminal(&mut terminal).context("restoring terminal")?;
    poller.abort();
    result.context("event loop")
}

#[cfg(test)]
mod tests;
