//! Structural notification handlers
//!
//! Reacts to docked windows mapping, resizing, changing `_XEMBED_INFO`, or
//! going away. Notifications about windows that are not docked are expected
//! (the router does not know the registry) and are dropped quietly.

use crate::backend::Windowing;
use crate::commands::Cmd;
use crate::error::{BackendResult, RegistryError};
use crate::messages::StructureMsg;
use crate::model::{apply_external_update, EmbedUpdate, TrayModel};
use crate::protocol::XembedMessage;
use crate::view::geometry::ICON_SIZE;

/// Update function for structural notifications
pub fn update_structure<W: Windowing>(
    model: &mut TrayModel,
    backend: &mut W,
    msg: StructureMsg,
) -> BackendResult<Option<Cmd>> {
    match msg {
        StructureMsg::MapRequest(window) => {
            if model.registry.contains(window) {
                tracing::debug!(target: "structure", "Raising 0x{:x} on map request", window);
                backend.map_raised(window)?;
                backend.send_xembed(window, XembedMessage::WindowActivate)?;
                backend.flush()?;
            }
            Ok(None)
        }

        StructureMsg::EmbedInfoChanged(window) => {
            let Some(item) = model.registry.find_mut(window) else {
                return Ok(None);
            };

            let Some(info) = backend.embed_info(window)? else {
                tracing::debug!(target: "structure", "0x{:x} dropped _XEMBED_INFO", window);
                return Ok(None);
            };

            if apply_external_update(item, info.flags, backend)? == EmbedUpdate::Changed {
                tracing::debug!(
                    target: "structure",
                    "0x{:x} flags now {:#x}",
                    window,
                    info.flags.bits()
                );
                backend.flush()?;
            }
            Ok(None)
        }

        // Icons may not grow beyond their cell
        StructureMsg::Configured { window, width, .. } => {
            if model.registry.contains(window) && width != ICON_SIZE {
                tracing::debug!(target: "structure", "Clamping 0x{:x} from width {}", window, width);
                backend.resize(window, ICON_SIZE, ICON_SIZE)?;
                backend.flush()?;
            }
            Ok(None)
        }

        StructureMsg::Detached { window, reason } => match model.registry.remove(window) {
            Ok(_) => {
                model.balloons.drop_window(window);
                tracing::info!("Removed 0x{:x} ({:?})", window, reason);
                Ok(Some(Cmd::Repaint))
            }
            Err(RegistryError::NotFound(_)) => Ok(None),
            Err(e) => {
                tracing::warn!("Unexpected registry error for 0x{:x}: {}", window, e);
                Ok(None)
            }
        },
    }
}
