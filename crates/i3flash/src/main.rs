#![warn(missing_docs)]

//! Entry point for the `i3flash` binary: flash i3 windows on focus.

mod cli;
mod error;

use std::process;

use clap::Parser;
use flash_engine::{Flasher, Monitor};
use i3_ipc::{Connection, EventKind};
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use x11_winops::{WindowId, Xprop};

use crate::{cli::Cli, error::Result};

fn main() {
    // Invalid arguments exit here, before any connection to i3.
    let cli = Cli::parse();
    logging::init();
    if let Err(err) = run(&cli) {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Start a single-threaded runtime and dispatch on the chosen mode.
fn run(cli: &Cli) -> Result<()> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        if cli.flash_current {
            flash_current_window(cli).await
        } else {
            monitor_focus(cli).await
        }
    })
}

/// Open the i3 connection.
async fn connect() -> Result<Connection> {
    info!("Establishing connection with i3...");
    let conn = Connection::connect().await?;
    info!("Connection established");
    Ok(conn)
}

/// Flasher configured from the command line, backed by `xprop`.
fn flasher(cli: &Cli) -> Flasher<Xprop> {
    Flasher::new(Xprop::new(), cli.opacity, cli.duration())
}

/// Flash the currently focused window once.
///
/// Having no focused window is an error; a failed flash is only a warning.
async fn flash_current_window(cli: &Cli) -> Result<()> {
    let mut conn = connect().await?;
    let window = WindowId::new(conn.get_focused_window().await?);
    drop(conn);
    info!(%window, "Flashing the current window");
    match flasher(cli).flash(window).await {
        Ok(()) => Ok(()),
        Err(err) if !err.is_fatal() => {
            warn!(%window, error = %err, "flash abandoned");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Flash every newly focused window until the connection to i3 ends.
async fn monitor_focus(cli: &Cli) -> Result<()> {
    let events = connect().await?.subscribe(&[EventKind::Window]).await?;
    info!(
        opacity = %cli.opacity,
        duration_ms = cli.time,
        "monitoring focus changes"
    );
    let mut monitor = Monitor::new(flasher(cli), events);
    monitor.run().await?;
    Ok(())
}
