//! Tray configuration persistence
//!
//! Stores user preferences in `~/.config/trayhost/config.yaml`. Command-line
//! flags override whatever is loaded here (see `cli::CliArgs::into_config`).

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tray configuration loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayConfig {
    /// X display to connect to; `None` uses `$DISPLAY`
    #[serde(default)]
    pub display: Option<String>,

    /// Initial window geometry, `WxH+X+Y`
    #[serde(default = "default_geometry")]
    pub geometry: String,

    /// Run as a Window Maker dockapp (separate icon window)
    #[serde(default = "default_window_maker")]
    pub window_maker: bool,

    /// Sleep between event batches, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_geometry() -> String {
    "64x64+0+0".to_string()
}

fn default_window_maker() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            display: None,
            geometry: default_geometry(),
            window_maker: default_window_maker(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl TrayConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
