//! trayhost - Elm-style X11 system tray host
//!
//! This crate provides the core types and logic for a small system tray that
//! docks icon windows from other programs (XEMBED + freedesktop tray protocol)
//! into a fixed 2x2 grid.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod messages;
pub mod model;
pub mod protocol;
pub mod router;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use backend::{Windowing, WindowId};
pub use commands::Cmd;
pub use config::TrayConfig;
pub use messages::Msg;
pub use model::TrayModel;
