//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! docking, embedding, and registry state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dock=debug,embed=trace` - scoped filtering
//! - `RUST_LOG=trayhost::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/trayhost/logs/trayhost.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::backend::WindowId;
use crate::model::ItemRegistry;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// records at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "trayhost.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the registry for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub items: Vec<ItemInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInfo {
    pub window: WindowId,
    pub flags: u32,
    pub version: u32,
}

impl RegistrySnapshot {
    pub fn from_registry(registry: &ItemRegistry) -> Self {
        Self {
            items: registry
                .iter()
                .map(|item| ItemInfo {
                    window: item.window(),
                    flags: item.flags().bits(),
                    version: item.version(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &RegistrySnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for before in &self.items {
            match other.items.iter().find(|a| a.window == before.window) {
                None => changes.push(format!("-0x{:x}", before.window)),
                Some(after) if after.flags != before.flags => changes.push(format!(
                    "0x{:x}: flags {:#x} → {:#x}",
                    before.window, before.flags, after.flags
                )),
                Some(_) => {}
            }
        }

        for after in &other.items {
            if !self.items.iter().any(|b| b.window == after.window) {
                changes.push(format!("+0x{:x} (v{})", after.window, after.version));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(format!(
                "items {} → {}: {}",
                self.items.len(),
                other.items.len(),
                changes.join("; ")
            ))
        }
    }
}
