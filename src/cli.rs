//! Command-line argument parsing for the tray
//!
//! Supports:
//! - Choosing the X display
//! - Initial window geometry (`WxH+X+Y`)
//! - Disabling Window Maker dockapp mode
//! - An explicit config file and poll interval

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::TrayConfig;

/// Size used when a geometry string leaves it out
const DEFAULT_SIZE: u16 = 64;

/// A small system tray for docked status icons
#[derive(Parser, Debug)]
#[command(name = "trayhost", version, about = "A small system tray for docked status icons")]
pub struct CliArgs {
    /// X display to connect to (defaults to $DISPLAY)
    #[arg(short = 'd', long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Initial window geometry
    #[arg(short = 'g', long, value_name = "WxH+X+Y")]
    pub geometry: Option<String>,

    /// Run as a plain window instead of a Window Maker dockapp
    #[arg(long)]
    pub no_wmaker: bool,

    /// Read configuration from PATH instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds to sleep between event batches
    #[arg(long, value_name = "MS")]
    pub poll_interval: Option<u64>,
}

/// Window placement parsed from an X-style geometry string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub x: i16,
    pub y: i16,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            x: 0,
            y: 0,
        }
    }
}

impl Geometry {
    /// Parse `WxH`, `WxH+X+Y` or `+X+Y`; offsets may be negative (`+-5` or `-5`)
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let invalid = || format!("Invalid geometry '{}', expected WxH+X+Y", input);

        let offsets_at = input.find(['+', '-']).unwrap_or(input.len());
        let (size, offsets) = input.split_at(offsets_at);

        let mut geometry = Geometry::default();

        if !size.is_empty() {
            let (w, h) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
            geometry.width = w.parse().map_err(|_| invalid())?;
            geometry.height = h.parse().map_err(|_| invalid())?;
            if geometry.width == 0 || geometry.height == 0 {
                return Err(invalid());
            }
        }

        if !offsets.is_empty() {
            let (x, y) = split_offsets(offsets).ok_or_else(invalid)?;
            geometry.x = x;
            geometry.y = y;
        }

        Ok(geometry)
    }
}

/// Split `+X+Y` / `-X-Y` / `+-X+Y` into two signed offsets
fn split_offsets(s: &str) -> Option<(i16, i16)> {
    let rest = s.strip_prefix('+').unwrap_or(s);
    // The second offset starts at the next sign after the first digit
    let first_digit = rest.find(|c: char| c.is_ascii_digit())?;
    let split = first_digit + rest[first_digit..].find(['+', '-'])?;
    let (x, y) = rest.split_at(split);
    let y = y.strip_prefix('+').unwrap_or(y);
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub display: Option<String>,
    pub geometry: Geometry,
    /// Run as a Window Maker dockapp
    pub window_maker: bool,
    pub poll_interval: Duration,
}

impl CliArgs {
    /// Merge parsed CLI args over the loaded file config
    pub fn into_config(self, file: TrayConfig) -> Result<StartupConfig, String> {
        let geometry_str = self.geometry.unwrap_or(file.geometry);
        let geometry = Geometry::parse(&geometry_str)?;

        let poll_ms = self.poll_interval.unwrap_or(file.poll_interval_ms);
        if poll_ms == 0 {
            return Err("Poll interval must be at least 1 ms".to_string());
        }

        Ok(StartupConfig {
            display: self.display.or(file.display),
            geometry,
            window_maker: file.window_maker && !self.no_wmaker,
            poll_interval: Duration::from_millis(poll_ms),
        })
    }
}
