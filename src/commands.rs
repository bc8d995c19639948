//! Command types for the Elm-style architecture
//!
//! Commands represent drawing work to perform after an update. The runtime
//! executes the returned command before taking the next event, so every event
//! turn ends with a fully flushed frame.

/// Drawing work requested by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Redraw the background and reposition every docked icon
    Repaint,
    /// Redraw the background only; icons stay where they are
    RepaintBackground,
}
