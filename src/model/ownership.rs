//! Tray manager selection ownership
//!
//! A one-shot acquire/release guard around `_NET_SYSTEM_TRAY_Sn`. Claiming
//! re-reads the owner after the request; losing the race is fatal for the
//! whole process. A successful claim is announced on the root window so
//! waiting tray icons can find us.

use crate::backend::{Atom, WindowId, Windowing};
use crate::error::{BackendResult, OwnershipError};
use crate::protocol::tray_selection_name;

/// Ownership state of the tray selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrayOwnership {
    #[default]
    Unclaimed,
    Claimed { selection: Atom, owner: WindowId },
}

impl TrayOwnership {
    pub fn is_claimed(&self) -> bool {
        matches!(self, TrayOwnership::Claimed { .. })
    }

    /// Claim the tray selection for `screen` on behalf of `owner`
    ///
    /// Already holding the selection is not an error.
    pub fn claim<W: Windowing>(
        &mut self,
        backend: &mut W,
        screen: usize,
        owner: WindowId,
    ) -> Result<(), OwnershipError> {
        if self.is_claimed() {
            return Ok(());
        }

        let name = tray_selection_name(screen);
        let claim = backend.claim_selection(&name, owner)?;
        if claim.owner != owner {
            tracing::error!(
                "Selection {} is owned by 0x{:x}; another tray is running",
                name,
                claim.owner
            );
            return Err(OwnershipError::AlreadyOwned {
                selection: claim.selection,
                owner: claim.owner,
            });
        }

        backend.announce_manager(claim.selection, owner)?;
        backend.flush()?;

        tracing::info!("Acquired {} for window 0x{:x}", name, owner);
        *self = TrayOwnership::Claimed {
            selection: claim.selection,
            owner,
        };
        Ok(())
    }

    /// Give up the selection; a no-op unless currently claimed
    pub fn release<W: Windowing>(&mut self, backend: &mut W) -> BackendResult<()> {
        if let TrayOwnership::Claimed { selection, .. } = *self {
            *self = TrayOwnership::Unclaimed;
            backend.release_selection(selection)?;
            tracing::info!("Released tray selection");
        }
        Ok(())
    }
}
