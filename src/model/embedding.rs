//! Per-item embedding state machine
//!
//! An item is `Mapped` or `Unmapped` according to the MAPPED bit of the flags
//! its client last reported in `_XEMBED_INFO`. When the client rewrites the
//! property the host diffs the flags and mirrors a flipped MAPPED bit onto the
//! window, notifying the client of the matching activation change.

use crate::backend::Windowing;
use crate::error::BackendResult;
use crate::protocol::{EmbedFlags, XembedMessage};

use super::registry::DockedItem;

/// Visibility state derived from the client's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    Unmapped,
    Mapped,
}

/// Whether an external update changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedUpdate {
    Changed,
    Unchanged,
}

impl DockedItem {
    pub fn state(&self) -> EmbedState {
        if self.flags.is_mapped() {
            EmbedState::Mapped
        } else {
            EmbedState::Unmapped
        }
    }
}

/// Apply flags freshly read from the client's `_XEMBED_INFO`
///
/// Equal flags are a no-op. Otherwise the new flags are stored and, only if
/// MAPPED flipped:
/// - set: map and raise, then `XEMBED_WINDOW_ACTIVATE`
/// - cleared: unmap, then `XEMBED_WINDOW_DEACTIVATE` and `XEMBED_FOCUS_OUT`
pub fn apply_external_update<W: Windowing>(
    item: &mut DockedItem,
    new_flags: EmbedFlags,
    backend: &mut W,
) -> BackendResult<EmbedUpdate> {
    let delta = new_flags ^ item.flags;
    if delta.is_empty() {
        return Ok(EmbedUpdate::Unchanged);
    }

    item.flags = new_flags;

    if delta.is_mapped() {
        if new_flags.is_mapped() {
            tracing::debug!(target: "embed", window = item.window, "mapping on info change");
            backend.map_raised(item.window)?;
            backend.send_xembed(item.window, XembedMessage::WindowActivate)?;
        } else {
            tracing::debug!(target: "embed", window = item.window, "unmapping on info change");
            backend.unmap(item.window)?;
            backend.send_xembed(item.window, XembedMessage::WindowDeactivate)?;
            backend.send_xembed(item.window, XembedMessage::FocusOut)?;
        }
    }

    Ok(EmbedUpdate::Changed)
}
