//! Windowing backend - the capability interface the tray core drives
//!
//! The core never talks to the display server directly. Everything it needs is
//! expressed through [`Windowing`] (outbound requests) and [`EventSource`]
//! (inbound events as backend-neutral [`RawEvent`]s). The X11 implementation
//! lives in [`x11`]; tests substitute a recording fake.

pub mod x11;

use crate::error::BackendResult;
use crate::protocol::{EmbedInfo, XembedMessage};
use crate::view::geometry::Rect;

/// Opaque handle of a window on the display
pub type WindowId = u32;

/// Interned atom
pub type Atom = u32;

/// The null window (`None` on the wire)
pub const NO_WINDOW: WindowId = 0;

/// Outcome of a selection ownership request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionClaim {
    /// The interned selection atom
    pub selection: Atom,
    /// Owner as re-read after the request; differs from ours if we lost a race
    pub owner: WindowId,
}

/// Requests the tray core issues to the windowing system
///
/// Mutating calls may be buffered; `flush` is a synchronous round trip after
/// which every earlier request has been processed.
pub trait Windowing {
    /// Root window of the screen the tray runs on
    fn root(&self) -> WindowId;

    /// Index of the screen the tray runs on
    fn screen_index(&self) -> usize;

    /// Request ownership of the named selection for `owner`, then re-read it
    fn claim_selection(&mut self, name: &str, owner: WindowId) -> BackendResult<SelectionClaim>;

    /// Broadcast a `MANAGER` client message announcing `owner` on the root window
    fn announce_manager(&mut self, selection: Atom, owner: WindowId) -> BackendResult<()>;

    /// Give up ownership of a selection
    fn release_selection(&mut self, selection: Atom) -> BackendResult<()>;

    /// Receive structure and property-change notifications for a foreign window
    fn subscribe(&mut self, window: WindowId) -> BackendResult<()>;

    fn reparent(&mut self, window: WindowId, parent: WindowId, x: i16, y: i16)
        -> BackendResult<()>;

    /// Remove a window from the window manager's control (ICCCM withdraw)
    fn withdraw(&mut self, window: WindowId) -> BackendResult<()>;

    fn map_raised(&mut self, window: WindowId) -> BackendResult<()>;

    fn unmap(&mut self, window: WindowId) -> BackendResult<()>;

    fn move_resize(&mut self, window: WindowId, rect: Rect) -> BackendResult<()>;

    fn resize(&mut self, window: WindowId, width: u16, height: u16) -> BackendResult<()>;

    /// Read a client's `_XEMBED_INFO`; `None` if the property is absent or short
    fn embed_info(&mut self, window: WindowId) -> BackendResult<Option<EmbedInfo>>;

    fn send_xembed(&mut self, window: WindowId, message: XembedMessage) -> BackendResult<()>;

    /// Redraw the host's background over `rect` of the drawing surface
    fn draw_background(&mut self, rect: Rect) -> BackendResult<()>;

    fn flush(&mut self) -> BackendResult<()>;
}

/// Source of inbound events, polled without blocking
pub trait EventSource {
    fn poll_event(&mut self) -> BackendResult<Option<RawEvent>>;
}

/// The 20 data bytes of a client message
///
/// Format-32 messages read them as five native-endian words, format-8
/// messages (balloon text) as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageData([u8; 20]);

impl MessageData {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_words(words: [u32; 5]) -> Self {
        let mut bytes = [0u8; 20];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_ne_bytes());
        }
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn words(&self) -> [u32; 5] {
        let mut words = [0u32; 5];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        words
    }
}

/// A windowing-system event, stripped down to what the router inspects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    ClientMessage {
        window: WindowId,
        message_type: Atom,
        format: u8,
        data: MessageData,
    },
    MapRequest {
        window: WindowId,
    },
    Expose {
        window: WindowId,
    },
    PropertyNotify {
        window: WindowId,
        atom: Atom,
    },
    ConfigureNotify {
        window: WindowId,
        width: u16,
        height: u16,
    },
    ReparentNotify {
        window: WindowId,
        parent: WindowId,
    },
    UnmapNotify {
        window: WindowId,
    },
    DestroyNotify {
        window: WindowId,
    },
    ButtonPress {
        window: WindowId,
        x: i16,
        y: i16,
    },
    /// Keyboard and focus traffic on the host windows
    Input,
    Other,
}
