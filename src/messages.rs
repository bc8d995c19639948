//! Message types for the Elm-style architecture
//!
//! Every inbound event the tray cares about is classified into one of these
//! by `router::classify`; all state changes flow through them.

use crate::backend::WindowId;
use crate::protocol::MESSAGE_DATA_CHUNK;

/// Tray protocol messages (`_NET_SYSTEM_TRAY_OPCODE` and balloon data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayMsg {
    /// A client asks to be docked
    RequestDock(WindowId),
    /// A docked client announces a balloon message
    BeginMessage {
        window: WindowId,
        timeout_ms: u32,
        length: u32,
        id: u32,
    },
    /// One chunk of balloon text
    MessageData {
        window: WindowId,
        bytes: [u8; MESSAGE_DATA_CHUNK],
    },
    /// A docked client withdraws a balloon message
    CancelMessage { window: WindowId, id: u32 },
    /// Opcode outside the tray protocol
    Unknown { window: WindowId, opcode: u32 },
}

/// XEMBED messages an embedded client sends to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMsg {
    RequestFocus { window: WindowId },
    FocusNext { window: WindowId },
    FocusPrev { window: WindowId },
    RegisterAccelerator {
        window: WindowId,
        id: u32,
        key: u32,
        modifiers: u32,
    },
    UnregisterAccelerator { window: WindowId, id: u32 },
    /// Opcode that a client has no business sending to its embedder
    Unknown { window: WindowId, opcode: u32 },
}

/// Why a docked window is leaving the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachReason {
    Reparented,
    Unmapped,
    Destroyed,
}

/// Structural and property notifications about foreign windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureMsg {
    /// A window tried to map itself
    MapRequest(WindowId),
    /// `_XEMBED_INFO` changed on a window
    EmbedInfoChanged(WindowId),
    /// A window's geometry changed
    Configured {
        window: WindowId,
        width: u16,
        height: u16,
    },
    /// A window went away from under us
    Detached {
        window: WindowId,
        reason: DetachReason,
    },
}

/// Pointer input on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMsg {
    Press { x: i16, y: i16 },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Tray(TrayMsg),
    Embed(EmbedMsg),
    Structure(StructureMsg),
    /// Part of the host surface needs redrawing
    Expose,
    Pointer(PointerMsg),
}
