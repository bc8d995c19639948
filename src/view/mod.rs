//! View module - turns commands into drawing requests
//!
//! The tray draws almost nothing itself: the background comes from the parent
//! (`ParentRelative`) and each icon paints its own window. Rendering therefore
//! means clearing the grid area and placing every docked window in its slot.

pub mod geometry;

pub use geometry::{background_region, compute_slot, slot_rect, Rect, ICON_SIZE};
pub use hit_test::{hit_test, slot_at};

use crate::backend::Windowing;
use crate::commands::Cmd;
use crate::error::BackendResult;
use crate::model::{TrayModel, MAX_ITEMS};

/// Execute a command produced by `update`
pub fn render<W: Windowing>(model: &TrayModel, backend: &mut W, cmd: Cmd) -> BackendResult<()> {
    match cmd {
        Cmd::Repaint => repaint(model, backend),
        Cmd::RepaintBackground => {
            backend.draw_background(background_region())?;
            backend.flush()
        }
    }
}

/// Full repaint: background, then every item at its slot in registry order
pub fn repaint<W: Windowing>(model: &TrayModel, backend: &mut W) -> BackendResult<()> {
    backend.draw_background(background_region())?;

    for (index, item) in model.registry.iter().take(MAX_ITEMS).enumerate() {
        backend.move_resize(item.window(), slot_rect(index))?;
    }

    tracing::trace!(target: "view", items = model.registry.len(), "repainted");
    backend.flush()
}
