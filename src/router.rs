//! Event router - classify raw windowing events into messages
//!
//! Classification order follows the protocols' precedence:
//! 1. XEMBED messages (`_XEMBED`, format 32)
//! 2. Tray opcodes (`_NET_SYSTEM_TRAY_OPCODE`, format 32) and balloon data
//! 3. Structural notifications, by event type
//!
//! Events the tray does not care about classify to `None`. The router is pure:
//! whether a window is actually docked is decided by the update handlers.

use crate::backend::{RawEvent, WindowId};
use crate::messages::{DetachReason, EmbedMsg, Msg, PointerMsg, StructureMsg, TrayMsg};
use crate::model::HostWindows;
use crate::protocol::{ProtocolAtoms, TrayOpcode, XembedOpcode};

/// Classify one raw event
pub fn classify(event: &RawEvent, atoms: &ProtocolAtoms, hosts: &HostWindows) -> Option<Msg> {
    match *event {
        RawEvent::ClientMessage {
            window,
            message_type,
            format,
            ref data,
        } => {
            if message_type == atoms.xembed && format == 32 {
                Some(Msg::Embed(decode_embed(window, data.words())))
            } else if message_type == atoms.tray_opcode && format == 32 {
                Some(Msg::Tray(decode_tray(window, data.words())))
            } else if message_type == atoms.tray_message_data && format == 8 {
                Some(Msg::Tray(TrayMsg::MessageData {
                    window,
                    bytes: *data.bytes(),
                }))
            } else {
                None
            }
        }

        RawEvent::MapRequest { window } => Some(Msg::Structure(StructureMsg::MapRequest(window))),

        RawEvent::Expose { .. } => Some(Msg::Expose),

        RawEvent::PropertyNotify { window, atom } => {
            if window == hosts.main || atom != atoms.xembed_info {
                return None;
            }
            Some(Msg::Structure(StructureMsg::EmbedInfoChanged(window)))
        }

        RawEvent::ConfigureNotify {
            window,
            width,
            height,
        } => {
            if hosts.owns(window) {
                return None;
            }
            Some(Msg::Structure(StructureMsg::Configured {
                window,
                width,
                height,
            }))
        }

        // Our own reparent while docking reports one of our windows as parent
        RawEvent::ReparentNotify { window, parent } => {
            if hosts.owns(parent) {
                return None;
            }
            Some(detached(window, DetachReason::Reparented))
        }

        RawEvent::UnmapNotify { window } => Some(detached(window, DetachReason::Unmapped)),

        RawEvent::DestroyNotify { window } => Some(detached(window, DetachReason::Destroyed)),

        RawEvent::ButtonPress { window, x, y } => {
            if window != hosts.draw {
                return None;
            }
            Some(Msg::Pointer(PointerMsg::Press { x, y }))
        }

        RawEvent::Input | RawEvent::Other => None,
    }
}

fn detached(window: WindowId, reason: DetachReason) -> Msg {
    Msg::Structure(StructureMsg::Detached { window, reason })
}

/// Decode `[time, opcode, detail, data1, data2]` of an `_XEMBED` message
fn decode_embed(window: WindowId, words: [u32; 5]) -> EmbedMsg {
    match XembedOpcode::from_u32(words[1]) {
        Some(XembedOpcode::RequestFocus) => EmbedMsg::RequestFocus { window },
        Some(XembedOpcode::FocusNext) => EmbedMsg::FocusNext { window },
        Some(XembedOpcode::FocusPrev) => EmbedMsg::FocusPrev { window },
        Some(XembedOpcode::RegisterAccelerator) => EmbedMsg::RegisterAccelerator {
            window,
            id: words[2],
            key: words[3],
            modifiers: words[4],
        },
        Some(XembedOpcode::UnregisterAccelerator) => EmbedMsg::UnregisterAccelerator {
            window,
            id: words[2],
        },
        _ => EmbedMsg::Unknown {
            window,
            opcode: words[1],
        },
    }
}

/// Decode `[time, opcode, data...]` of a `_NET_SYSTEM_TRAY_OPCODE` message
fn decode_tray(window: WindowId, words: [u32; 5]) -> TrayMsg {
    match TrayOpcode::from_u32(words[1]) {
        Some(TrayOpcode::RequestDock) => TrayMsg::RequestDock(words[2]),
        Some(TrayOpcode::BeginMessage) => TrayMsg::BeginMessage {
            window,
            timeout_ms: words[2],
            length: words[3],
            id: words[4],
        },
        Some(TrayOpcode::CancelMessage) => TrayMsg::CancelMessage {
            window,
            id: words[2],
        },
        None => TrayMsg::Unknown {
            window,
            opcode: words[1],
        },
    }
}
