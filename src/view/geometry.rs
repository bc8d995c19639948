//! Centralized geometry for the icon grid
//!
//! Single source of truth for slot positions, shared between repainting
//! (`view::repaint`) and pointer hit-testing (`view::hit_test`).
//!
//! All functions here are pure and can be tested without a display.

// ============================================================================
// Layout Constants
// ============================================================================

/// Width and height of one icon cell
pub const ICON_SIZE: u16 = 24;

/// Number of columns in the icon grid
pub const GRID_COLUMNS: usize = 2;

/// Number of rows in the icon grid
pub const GRID_ROWS: usize = 2;

/// Top-left corner of slot 0 on the drawing surface
pub const GRID_ORIGIN: (i16, i16) = (8, 4);

/// Area of the drawing surface covered by the icon grid
pub const ACTIVE_AREA: Rect = Rect::new(
    GRID_ORIGIN.0,
    GRID_ORIGIN.1,
    ICON_SIZE * GRID_COLUMNS as u16,
    ICON_SIZE * GRID_ROWS as u16,
);

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle in drawing-surface units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (x, y) = (i32::from(self.x), i32::from(self.y));
        px >= x && px < x + i32::from(self.width) && py >= y && py < y + i32::from(self.height)
    }

    /// Grow by `by` units on every side
    pub const fn inflate(&self, by: u16) -> Rect {
        Rect::new(
            self.x - by as i16,
            self.y - by as i16,
            self.width + 2 * by,
            self.height + 2 * by,
        )
    }
}

// ============================================================================
// Slots
// ============================================================================

/// Top-left position of the slot at `index` (registry order)
///
/// Fills row by row: `x = 8 + (index % 2) * 24`, `y = 4 + (index / 2) * 24`.
#[inline]
pub fn compute_slot(index: usize) -> (i16, i16) {
    let column = (index % GRID_COLUMNS) as i16;
    let row = (index / GRID_COLUMNS) as i16;
    let cell = ICON_SIZE as i16;
    (GRID_ORIGIN.0 + column * cell, GRID_ORIGIN.1 + row * cell)
}

/// Full cell rectangle for the slot at `index`
#[inline]
pub fn slot_rect(index: usize) -> Rect {
    let (x, y) = compute_slot(index);
    Rect::new(x, y, ICON_SIZE, ICON_SIZE)
}

/// Region of the background redrawn before icons are repositioned
///
/// The grid plus a one-unit frame, so the bevel around the grid is refreshed.
#[inline]
pub fn background_region() -> Rect {
    ACTIVE_AREA.inflate(1)
}
