//! Wire-level constants and payload types for the two docking protocols
//!
//! - freedesktop System Tray: selection ownership, `_NET_SYSTEM_TRAY_OPCODE`
//!   client messages, message balloons
//! - XEMBED: `_XEMBED` client messages and the `_XEMBED_INFO` property
//!
//! Client message payloads are five 32-bit words. For both protocols word 0 is
//! a timestamp and word 1 the opcode.

use std::ops::BitXor;

use crate::backend::{Atom, WindowId};

/// Highest XEMBED protocol version the host speaks
pub const XEMBED_VERSION: u32 = 0;

/// `CurrentTime`
pub const CURRENT_TIME: u32 = 0;

/// Name of the per-screen tray manager selection
pub fn tray_selection_name(screen: usize) -> String {
    format!("_NET_SYSTEM_TRAY_S{}", screen)
}

/// Atoms the router and handlers need to recognize protocol traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolAtoms {
    pub xembed: Atom,
    pub xembed_info: Atom,
    pub tray_opcode: Atom,
    pub tray_message_data: Atom,
    pub manager: Atom,
}

// ============================================================================
// Tray protocol
// ============================================================================

/// Opcodes carried in word 1 of a `_NET_SYSTEM_TRAY_OPCODE` message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayOpcode {
    RequestDock,
    BeginMessage,
    CancelMessage,
}

impl TrayOpcode {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(TrayOpcode::RequestDock),
            1 => Some(TrayOpcode::BeginMessage),
            2 => Some(TrayOpcode::CancelMessage),
            _ => None,
        }
    }
}

/// Bytes of balloon text carried by one `_NET_SYSTEM_TRAY_MESSAGE_DATA` message
pub const MESSAGE_DATA_CHUNK: usize = 20;

// ============================================================================
// XEMBED
// ============================================================================

/// XEMBED message opcodes (word 1 of an `_XEMBED` message)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XembedOpcode {
    EmbeddedNotify,
    WindowActivate,
    WindowDeactivate,
    RequestFocus,
    FocusIn,
    FocusOut,
    FocusNext,
    FocusPrev,
    ModalityOn,
    ModalityOff,
    RegisterAccelerator,
    UnregisterAccelerator,
    ActivateAccelerator,
}

impl XembedOpcode {
    pub fn from_u32(value: u32) -> Option<Self> {
        let opcode = match value {
            0 => XembedOpcode::EmbeddedNotify,
            1 => XembedOpcode::WindowActivate,
            2 => XembedOpcode::WindowDeactivate,
            3 => XembedOpcode::RequestFocus,
            4 => XembedOpcode::FocusIn,
            5 => XembedOpcode::FocusOut,
            6 => XembedOpcode::FocusNext,
            7 => XembedOpcode::FocusPrev,
            10 => XembedOpcode::ModalityOn,
            11 => XembedOpcode::ModalityOff,
            12 => XembedOpcode::RegisterAccelerator,
            13 => XembedOpcode::UnregisterAccelerator,
            14 => XembedOpcode::ActivateAccelerator,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn code(self) -> u32 {
        match self {
            XembedOpcode::EmbeddedNotify => 0,
            XembedOpcode::WindowActivate => 1,
            XembedOpcode::WindowDeactivate => 2,
            XembedOpcode::RequestFocus => 3,
            XembedOpcode::FocusIn => 4,
            XembedOpcode::FocusOut => 5,
            XembedOpcode::FocusNext => 6,
            XembedOpcode::FocusPrev => 7,
            XembedOpcode::ModalityOn => 10,
            XembedOpcode::ModalityOff => 11,
            XembedOpcode::RegisterAccelerator => 12,
            XembedOpcode::UnregisterAccelerator => 13,
            XembedOpcode::ActivateAccelerator => 14,
        }
    }
}

/// Detail word of `XEMBED_FOCUS_IN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDetail {
    Current,
    First,
    Last,
}

impl FocusDetail {
    pub fn code(self) -> u32 {
        match self {
            FocusDetail::Current => 0,
            FocusDetail::First => 1,
            FocusDetail::Last => 2,
        }
    }
}

/// Messages the host sends to an embedded client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XembedMessage {
    /// Sent once after docking; tells the client who embeds it
    EmbeddedNotify { embedder: WindowId, version: u32 },
    WindowActivate,
    WindowDeactivate,
    FocusIn(FocusDetail),
    FocusOut,
}

impl XembedMessage {
    pub fn opcode(&self) -> XembedOpcode {
        match self {
            XembedMessage::EmbeddedNotify { .. } => XembedOpcode::EmbeddedNotify,
            XembedMessage::WindowActivate => XembedOpcode::WindowActivate,
            XembedMessage::WindowDeactivate => XembedOpcode::WindowDeactivate,
            XembedMessage::FocusIn(_) => XembedOpcode::FocusIn,
            XembedMessage::FocusOut => XembedOpcode::FocusOut,
        }
    }

    /// Encode as the five payload words `[time, opcode, detail, data1, data2]`
    pub fn encode(&self, time: u32) -> [u32; 5] {
        let opcode = self.opcode().code();
        match *self {
            XembedMessage::EmbeddedNotify { embedder, version } => {
                [time, opcode, 0, embedder, version]
            }
            XembedMessage::FocusIn(detail) => [time, opcode, detail.code(), 0, 0],
            _ => [time, opcode, 0, 0, 0],
        }
    }
}

/// Flag word of `_XEMBED_INFO`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmbedFlags(u32);

impl EmbedFlags {
    /// `XEMBED_MAPPED`: the client wants to be visible
    pub const MAPPED: EmbedFlags = EmbedFlags(1 << 0);

    pub const fn empty() -> Self {
        EmbedFlags(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        EmbedFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: EmbedFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_mapped(self) -> bool {
        self.contains(Self::MAPPED)
    }
}

impl BitXor for EmbedFlags {
    type Output = EmbedFlags;

    fn bitxor(self, rhs: Self) -> Self::Output {
        EmbedFlags(self.0 ^ rhs.0)
    }
}

/// Contents of a client's `_XEMBED_INFO` property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedInfo {
    pub version: u32,
    pub flags: EmbedFlags,
}

impl EmbedInfo {
    pub fn new(version: u32, flags: EmbedFlags) -> Self {
        Self { version, flags }
    }

    /// Decode the property value; needs at least the version and flags words
    pub fn from_words(words: &[u32]) -> Option<Self> {
        match words {
            [version, flags, ..] => Some(Self::new(*version, EmbedFlags::from_bits(*flags))),
            _ => None,
        }
    }

    /// Info assumed for clients that never set `_XEMBED_INFO`
    ///
    /// Such clients predate the property and expect to be shown as soon as
    /// they are docked.
    pub fn legacy() -> Self {
        Self::new(XEMBED_VERSION, EmbedFlags::MAPPED)
    }

    /// Version both sides understand: the lower of ours and theirs
    pub fn negotiated_version(&self) -> u32 {
        self.version.min(XEMBED_VERSION)
    }
}
