//! XEMBED update handlers
//!
//! Only focus requests need action. Focus chaining and accelerators are
//! recognized and acknowledged without effect; the tray has no focus chain of
//! its own and no key grabs to forward.

use crate::backend::Windowing;
use crate::commands::Cmd;
use crate::error::BackendResult;
use crate::messages::EmbedMsg;
use crate::model::TrayModel;
use crate::protocol::{FocusDetail, XembedMessage};

/// Update function for XEMBED messages
pub fn update_embed<W: Windowing>(
    _model: &mut TrayModel,
    backend: &mut W,
    msg: EmbedMsg,
) -> BackendResult<Option<Cmd>> {
    match msg {
        // The message names the window it was sent to, which is not
        // necessarily a docked item; answer it regardless
        EmbedMsg::RequestFocus { window } => {
            tracing::debug!(target: "embed", "Focus request via 0x{:x}", window);
            backend.send_xembed(window, XembedMessage::FocusIn(FocusDetail::Current))?;
            backend.flush()?;
        }

        EmbedMsg::FocusNext { window } | EmbedMsg::FocusPrev { window } => {
            tracing::trace!(target: "embed", "Focus chaining from 0x{:x} acknowledged", window);
        }

        EmbedMsg::RegisterAccelerator {
            window,
            id,
            key,
            modifiers,
        } => {
            tracing::trace!(
                target: "embed",
                "Accelerator {} (key {}, mods {:#x}) from 0x{:x} acknowledged",
                id,
                key,
                modifiers,
                window
            );
        }

        EmbedMsg::UnregisterAccelerator { window, id } => {
            tracing::trace!(target: "embed", "Accelerator {} from 0x{:x} released", id, window);
        }

        EmbedMsg::Unknown { window, opcode } => {
            tracing::debug!(
                target: "embed",
                "Ignoring XEMBED opcode {} from 0x{:x}",
                opcode,
                window
            );
        }
    }
    Ok(None)
}
