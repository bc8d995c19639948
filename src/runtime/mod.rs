//! Runtime module - event loop and process integration
//!
//! - `app` - the poll loop around classify / update / render
//! - `signals` - SIGINT/SIGTERM to cooperative shutdown

pub mod app;
pub mod signals;

pub use app::App;
