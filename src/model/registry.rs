//! Docked item registry and capacity gate
//!
//! The registry is an owned, ordered `Vec`. Order is dock order and decides
//! which grid slot an item occupies, so removal keeps the relative order of
//! the remaining items. With at most four entries, lookups are linear scans.

use crate::backend::{WindowId, Windowing};
use crate::error::{BackendResult, RegistryError};
use crate::protocol::{EmbedFlags, EmbedInfo};

/// Maximum number of concurrently docked items
pub const MAX_ITEMS: usize = 4;

// ============================================================================
// Capacity Gate
// ============================================================================

/// Decision on whether another item may be docked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accept,
    Reject,
}

/// Decide whether a dock request fits, given the number already docked
#[inline]
pub fn admit(current_count: usize) -> Admission {
    if current_count >= MAX_ITEMS {
        Admission::Reject
    } else {
        Admission::Accept
    }
}

// ============================================================================
// Docked Item
// ============================================================================

/// An embedded client window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockedItem {
    pub(super) window: WindowId,
    /// Last `_XEMBED_INFO` flags seen from the client
    pub(super) flags: EmbedFlags,
    /// Negotiated at dock time, fixed for the item's lifetime
    version: u32,
}

impl DockedItem {
    /// Record for a freshly docked client
    ///
    /// Flags start empty; the first `_XEMBED_INFO` notification is diffed
    /// against them.
    pub fn new(window: WindowId, info: &EmbedInfo) -> Self {
        Self {
            window,
            flags: EmbedFlags::empty(),
            version: info.negotiated_version(),
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn flags(&self) -> EmbedFlags {
        self.flags
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered collection of docked items
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<DockedItem>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(MAX_ITEMS),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_ITEMS
    }

    pub fn iter(&self) -> impl Iterator<Item = &DockedItem> {
        self.items.iter()
    }

    /// Item at a position in dock order
    pub fn get(&self, index: usize) -> Option<&DockedItem> {
        self.items.get(index)
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.find(window).is_some()
    }

    pub fn find(&self, window: WindowId) -> Option<&DockedItem> {
        self.items.iter().find(|item| item.window == window)
    }

    pub fn find_mut(&mut self, window: WindowId) -> Option<&mut DockedItem> {
        self.items.iter_mut().find(|item| item.window == window)
    }

    /// Position of a window in dock order (its slot index)
    pub fn position(&self, window: WindowId) -> Option<usize> {
        self.items.iter().position(|item| item.window == window)
    }

    /// Window identifiers in dock order
    pub fn windows(&self) -> Vec<WindowId> {
        self.items.iter().map(|item| item.window).collect()
    }

    /// Append an item; never drops silently
    pub fn insert_tail(&mut self, item: DockedItem) -> Result<(), RegistryError> {
        if self.contains(item.window) {
            return Err(RegistryError::Duplicate(item.window));
        }
        if admit(self.items.len()) == Admission::Reject {
            return Err(RegistryError::Full);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return an item, keeping the order of the rest
    pub fn remove(&mut self, window: WindowId) -> Result<DockedItem, RegistryError> {
        let index = self
            .position(window)
            .ok_or(RegistryError::NotFound(window))?;
        Ok(self.items.remove(index))
    }

    /// Hand every item back to the root window, then forget them all
    ///
    /// Every item is attempted even if an earlier one fails; the first error
    /// is returned after the registry has been cleared.
    pub fn teardown<W: Windowing>(&mut self, backend: &mut W) -> BackendResult<()> {
        let root = backend.root();
        let mut first_error = None;

        for item in self.items.drain(..) {
            tracing::debug!(target: "dock", window = item.window, "unembedding on teardown");
            let result = backend
                .unmap(item.window)
                .and_then(|_| backend.reparent(item.window, root, 0, 0));
            if let Err(e) = result {
                tracing::warn!("Failed to unembed 0x{:x}: {}", item.window, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
