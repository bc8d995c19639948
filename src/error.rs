//! Error types for the tray host
//!
//! Only `OwnershipError` is allowed to end the process. Registry and backend
//! errors are contained within a single event turn by the runtime.

use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};

use crate::backend::{Atom, WindowId};

/// Errors produced by the windowing backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("could not connect to display: {0}")]
    Connect(#[from] ConnectError),

    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("request failed: {0}")]
    Reply(#[from] ReplyError),

    #[error("request failed: {0}")]
    ReplyOrId(#[from] ReplyOrIdError),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors produced while claiming the tray selection.
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    #[error("system tray selection {selection} is already owned by window 0x{owner:x}")]
    AlreadyOwned { selection: Atom, owner: WindowId },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors produced by the docked item registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("tray is full")]
    Full,

    #[error("window 0x{0:x} is already docked")]
    Duplicate(WindowId),

    #[error("window 0x{0:x} is not docked")]
    NotFound(WindowId),
}
