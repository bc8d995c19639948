//! Application model - the complete state of the tray
//!
//! `TrayModel` is the explicit context object handed to every update
//! function. It is built once at startup and torn down at shutdown; nothing
//! in the crate keeps global state.

pub mod balloon;
pub mod embedding;
pub mod ownership;
pub mod registry;

pub use balloon::{Balloon, BalloonQueue};
pub use embedding::{apply_external_update, EmbedState, EmbedUpdate};
pub use ownership::TrayOwnership;
pub use registry::{admit, Admission, DockedItem, ItemRegistry, MAX_ITEMS};

use crate::backend::{WindowId, Windowing};
use crate::error::{BackendResult, OwnershipError};
use crate::protocol::ProtocolAtoms;

/// Windows the host created for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostWindows {
    /// Top-level application window
    pub main: WindowId,
    /// Dockapp icon window, when running in Window Maker mode
    pub icon: Option<WindowId>,
    /// Surface icons are reparented into (the icon window in dockapp mode)
    pub draw: WindowId,
    /// Invisible window that owns the tray selection
    pub selection: WindowId,
}

impl HostWindows {
    /// Whether `window` is one of the host's own windows
    pub fn owns(&self, window: WindowId) -> bool {
        window == self.main
            || window == self.draw
            || window == self.selection
            || self.icon == Some(window)
    }
}

/// The complete tray state
#[derive(Debug)]
pub struct TrayModel {
    pub hosts: HostWindows,
    pub atoms: ProtocolAtoms,
    pub registry: ItemRegistry,
    pub ownership: TrayOwnership,
    pub balloons: BalloonQueue,
}

impl TrayModel {
    pub fn new(hosts: HostWindows, atoms: ProtocolAtoms) -> Self {
        Self {
            hosts,
            atoms,
            registry: ItemRegistry::new(),
            ownership: TrayOwnership::Unclaimed,
            balloons: BalloonQueue::new(),
        }
    }

    /// Claim the tray selection for this host's selection window
    pub fn claim<W: Windowing>(&mut self, backend: &mut W) -> Result<(), OwnershipError> {
        let screen = backend.screen_index();
        self.ownership.claim(backend, screen, self.hosts.selection)
    }

    /// Release ownership, then unembed every docked client
    ///
    /// Safe to call more than once: later calls find nothing left to do.
    pub fn shutdown<W: Windowing>(&mut self, backend: &mut W) -> BackendResult<()> {
        let released = self.ownership.release(backend);
        let torn_down = self.registry.teardown(backend);
        self.balloons = BalloonQueue::new();
        backend.flush()?;
        released.and(torn_down)
    }
}
