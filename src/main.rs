use anyhow::{Context, Result};
use clap::Parser;

use trayhost::backend::x11::X11Backend;
use trayhost::cli::CliArgs;
use trayhost::config::TrayConfig;
use trayhost::runtime::{signals, App};

fn main() -> Result<()> {
    trayhost::tracing::init();

    let args = CliArgs::parse();
    let file_config = match &args.config {
        Some(path) => TrayConfig::load_from(path),
        None => TrayConfig::load(),
    };
    let startup = args
        .into_config(file_config)
        .map_err(|e| anyhow::anyhow!(e))?;

    #[cfg(unix)]
    signals::install().context("Failed to install signal handlers")?;

    let command: Vec<String> = std::env::args().collect();
    let backend = X11Backend::connect(&startup, &command).context("Failed to connect to X11")?;
    let hosts = backend.host_windows();
    let atoms = backend.atoms();

    let mut app = App::start(backend, hosts, atoms, startup.poll_interval)
        .context("Failed to claim system tray")?;

    let result = app.run().context("Lost connection to X11");
    if let Err(e) = app.shutdown() {
        tracing::error!("Failed to shut down cleanly: {}", e);
    }
    result
}
