//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Side effects on
//! foreign windows go straight to the backend; drawing is requested by
//! returning a `Cmd`.

mod dock;
mod embed;
mod structure;

use crate::backend::Windowing;
use crate::commands::Cmd;
use crate::error::BackendResult;
use crate::messages::{Msg, PointerMsg};
use crate::model::TrayModel;
use crate::view::hit_test::hit_test;

#[cfg(debug_assertions)]
use crate::tracing::RegistrySnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use dock::update_tray;
pub use embed::update_embed;
pub use structure::update_structure;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    msg: Msg,
) -> BackendResult<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, backend, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, backend, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    msg: Msg,
) -> BackendResult<Option<Cmd>> {
    match msg {
        Msg::Tray(m) => dock::update_tray(model, backend, m),
        Msg::Embed(m) => embed::update_embed(model, backend, m),
        Msg::Structure(m) => structure::update_structure(model, backend, m),
        Msg::Expose => Ok(Some(Cmd::RepaintBackground)),
        Msg::Pointer(m) => Ok(update_pointer(model, m)),
    }
}

fn update_pointer(model: &TrayModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Press { x, y } => {
            match hit_test(&model.registry, x.into(), y.into()) {
                Some(window) => {
                    tracing::debug!(target: "pointer", x, y, "press over 0x{:x}", window)
                }
                None => tracing::trace!(target: "pointer", x, y, "press over empty area"),
            }
            None
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after registry state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    msg: Msg,
) -> BackendResult<Option<Cmd>> {
    // Balloon text arrives in many small chunks
    let is_noisy = matches!(
        &msg,
        Msg::Expose | Msg::Tray(crate::messages::TrayMsg::MessageData { .. })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = RegistrySnapshot::from_registry(&model.registry);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, backend, msg);

    let after = RegistrySnapshot::from_registry(&model.registry);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "registry", %diff, "state changed");
    }

    result
}

/// Get a display name for a message
///
/// Example outputs:
/// - `Tray::RequestDock(4194305)`
/// - `Structure::Detached { window: 4194305, reason: Destroyed }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Tray(m) => format!("Tray::{:?}", m),
        Msg::Embed(m) => format!("Embed::{:?}", m),
        Msg::Structure(m) => format!("Structure::{:?}", m),
        Msg::Expose => "Expose".to_string(),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
    }
}
