//! Tray protocol update handlers
//!
//! Handles dock requests and the message balloon family.

use crate::backend::{WindowId, Windowing, NO_WINDOW};
use crate::commands::Cmd;
use crate::error::{BackendResult, RegistryError};
use crate::messages::TrayMsg;
use crate::model::{admit, Admission, Balloon, DockedItem, TrayModel};
use crate::protocol::{EmbedInfo, XembedMessage};

/// Update function for tray protocol messages
pub fn update_tray<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    msg: TrayMsg,
) -> BackendResult<Option<Cmd>> {
    match msg {
        TrayMsg::RequestDock(window) => request_dock(model, backend, window),

        TrayMsg::BeginMessage {
            window,
            timeout_ms,
            length,
            id,
        } => {
            if !model.registry.contains(window) {
                tracing::debug!(target: "dock", "Ignoring balloon from undocked 0x{:x}", window);
                return Ok(None);
            }
            if let Some(balloon) = model.balloons.begin(window, id, timeout_ms, length) {
                show_balloon(&balloon);
            }
            Ok(None)
        }

        TrayMsg::MessageData { window, bytes } => {
            if !model.registry.contains(window) {
                return Ok(None);
            }
            if let Some(balloon) = model.balloons.push_data(window, &bytes) {
                show_balloon(&balloon);
            }
            Ok(None)
        }

        TrayMsg::CancelMessage { window, id } => {
            if model.balloons.cancel(window, id) {
                tracing::debug!(target: "dock", "Balloon {} from 0x{:x} cancelled", id, window);
            }
            Ok(None)
        }

        TrayMsg::Unknown { window, opcode } => {
            tracing::debug!(
                target: "dock",
                "Ignoring unknown tray opcode {} from 0x{:x}",
                opcode,
                window
            );
            Ok(None)
        }
    }
}

/// Accept or reject a client's request to be docked
fn request_dock<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    window: WindowId,
) -> BackendResult<Option<Cmd>> {
    tracing::debug!(target: "dock", "Dock request from 0x{:x}", window);

    if window == NO_WINDOW || model.hosts.owns(window) {
        tracing::warn!("Ignoring dock request for invalid window 0x{:x}", window);
        return Ok(None);
    }

    if model.registry.contains(window) {
        tracing::warn!("{}", RegistryError::Duplicate(window));
        return Ok(None);
    }

    if admit(model.registry.len()) == Admission::Reject {
        // Hand the window back so the client sees a disposition
        let root = backend.root();
        backend.reparent(window, root, 0, 0)?;
        backend.flush()?;
        tracing::info!("Rejected dock request from 0x{:x}: {}", window, RegistryError::Full);
        return Ok(None);
    }

    backend.subscribe(window)?;
    backend.withdraw(window)?;
    backend.reparent(window, model.hosts.draw, 0, 0)?;
    backend.flush()?;

    let info = match backend.embed_info(window)? {
        Some(info) => info,
        None => {
            tracing::debug!(target: "dock", "0x{:x} has no _XEMBED_INFO, assuming mapped", window);
            EmbedInfo::legacy()
        }
    };

    let item = DockedItem::new(window, &info);
    let version = item.version();
    if let Err(e) = model.registry.insert_tail(item) {
        tracing::warn!("Could not dock 0x{:x}: {}", window, e);
        return Ok(None);
    }
    tracing::debug!(target: "dock", "Using protocol version {} for 0x{:x}", version, window);

    // Docked from here on: handshake failures are logged, the item is still laid out
    let handshake = backend
        .send_xembed(
            window,
            XembedMessage::EmbeddedNotify {
                embedder: model.hosts.draw,
                version,
            },
        )
        .and_then(|()| {
            if info.flags.is_mapped() {
                backend.map_raised(window)
            } else {
                Ok(())
            }
        });
    if let Err(e) = handshake {
        tracing::error!("Embedding handshake with 0x{:x} failed: {}", window, e);
    }

    tracing::info!(
        "Docked 0x{:x} ({} of {})",
        window,
        model.registry.len(),
        crate::model::MAX_ITEMS
    );
    Ok(Some(Cmd::Repaint))
}

fn show_balloon(balloon: &Balloon) {
    tracing::info!(
        target: "balloon",
        window = balloon.window,
        id = balloon.id,
        timeout_ms = balloon.timeout_ms,
        "{}",
        balloon.text()
    );
}
