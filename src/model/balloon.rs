//! Message balloon assembly
//!
//! Tray icons announce a balloon with `BeginMessage` (timeout, byte length,
//! id) and then stream the text in 20-byte `_NET_SYSTEM_TRAY_MESSAGE_DATA`
//! chunks. Balloons are assembled per sending window; a finished balloon is
//! handed back to the caller and no longer tracked.

use std::collections::VecDeque;

use crate::backend::WindowId;
use crate::protocol::MESSAGE_DATA_CHUNK;

/// Maximum number of balloons assembled at once; the oldest is evicted first
pub const MAX_PENDING_BALLOONS: usize = 16;

/// Upper bound on announced balloon length, in bytes
pub const MAX_BALLOON_BYTES: usize = 4096;

/// A balloon message from a docked icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balloon {
    pub window: WindowId,
    pub id: u32,
    /// Display timeout in milliseconds, 0 for no timeout
    pub timeout_ms: u32,
    expected: usize,
    bytes: Vec<u8>,
}

impl Balloon {
    fn new(window: WindowId, id: u32, timeout_ms: u32, expected: usize) -> Self {
        Self {
            window,
            id,
            timeout_ms,
            expected,
            bytes: Vec::with_capacity(expected),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bytes.len() >= self.expected
    }

    /// Text received so far, lossily decoded as UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    fn push_chunk(&mut self, chunk: &[u8; MESSAGE_DATA_CHUNK]) {
        let remaining = self.expected.saturating_sub(self.bytes.len());
        let take = remaining.min(MESSAGE_DATA_CHUNK);
        self.bytes.extend_from_slice(&chunk[..take]);
    }
}

/// Balloons still waiting for data
#[derive(Debug, Clone, Default)]
pub struct BalloonQueue {
    pending: VecDeque<Balloon>,
}

impl BalloonQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Start assembling a balloon; returns it directly if it has no text
    ///
    /// A second `begin` with the same window and id restarts that balloon.
    pub fn begin(
        &mut self,
        window: WindowId,
        id: u32,
        timeout_ms: u32,
        length: u32,
    ) -> Option<Balloon> {
        self.cancel(window, id);

        let expected = (length as usize).min(MAX_BALLOON_BYTES);
        let balloon = Balloon::new(window, id, timeout_ms, expected);
        if balloon.is_complete() {
            return Some(balloon);
        }

        if self.pending.len() >= MAX_PENDING_BALLOONS {
            if let Some(evicted) = self.pending.pop_front() {
                tracing::debug!(
                    target: "dock",
                    window = evicted.window,
                    id = evicted.id,
                    "evicting unfinished balloon"
                );
            }
        }
        self.pending.push_back(balloon);
        None
    }

    /// Feed one data chunk from `window`; returns the balloon once complete
    ///
    /// Data goes to the oldest unfinished balloon of that window. Chunks with
    /// no balloon in progress are dropped.
    pub fn push_data(
        &mut self,
        window: WindowId,
        chunk: &[u8; MESSAGE_DATA_CHUNK],
    ) -> Option<Balloon> {
        let index = self.pending.iter().position(|b| b.window == window)?;
        let balloon = &mut self.pending[index];
        balloon.push_chunk(chunk);
        if balloon.is_complete() {
            self.pending.remove(index)
        } else {
            None
        }
    }

    /// Drop a pending balloon; returns whether one was found
    pub fn cancel(&mut self, window: WindowId, id: u32) -> bool {
        let before = self.pending.len();
        self.pending.retain(|b| !(b.window == window && b.id == id));
        self.pending.len() != before
    }

    /// Forget everything from a window that left the tray
    pub fn drop_window(&mut self, window: WindowId) {
        self.pending.retain(|b| b.window != window);
    }
}
