//! Shared helpers for benchmarks

use trayhost::backend::{Atom, SelectionClaim, WindowId, Windowing};
use trayhost::error::BackendResult;
use trayhost::model::{HostWindows, TrayModel};
use trayhost::protocol::{EmbedFlags, EmbedInfo, ProtocolAtoms, XembedMessage};
use trayhost::view::Rect;

pub const ATOMS: ProtocolAtoms = ProtocolAtoms {
    xembed: 10,
    xembed_info: 11,
    tray_opcode: 12,
    tray_message_data: 13,
    manager: 14,
};

pub const HOSTS: HostWindows = HostWindows {
    main: 1,
    icon: Some(2),
    draw: 2,
    selection: 3,
};

/// Backend that accepts every request and reports every client as mapped
#[derive(Debug, Default)]
pub struct NullBackend;

impl Windowing for NullBackend {
    fn root(&self) -> WindowId {
        0xff
    }

    fn screen_index(&self) -> usize {
        0
    }

    fn claim_selection(&mut self, _name: &str, owner: WindowId) -> BackendResult<SelectionClaim> {
        Ok(SelectionClaim {
            selection: 20,
            owner,
        })
    }

    fn announce_manager(&mut self, _selection: Atom, _owner: WindowId) -> BackendResult<()> {
        Ok(())
    }

    fn release_selection(&mut self, _selection: Atom) -> BackendResult<()> {
        Ok(())
    }

    fn subscribe(&mut self, _window: WindowId) -> BackendResult<()> {
        Ok(())
    }

    fn reparent(&mut self, _: WindowId, _: WindowId, _: i16, _: i16) -> BackendResult<()> {
        Ok(())
    }

    fn withdraw(&mut self, _window: WindowId) -> BackendResult<()> {
        Ok(())
    }

    fn map_raised(&mut self, _window: WindowId) -> BackendResult<()> {
        Ok(())
    }

    fn unmap(&mut self, _window: WindowId) -> BackendResult<()> {
        Ok(())
    }

    fn move_resize(&mut self, _window: WindowId, _rect: Rect) -> BackendResult<()> {
        Ok(())
    }

    fn resize(&mut self, _window: WindowId, _width: u16, _height: u16) -> BackendResult<()> {
        Ok(())
    }

    fn embed_info(&mut self, _window: WindowId) -> BackendResult<Option<EmbedInfo>> {
        Ok(Some(EmbedInfo::new(0, EmbedFlags::MAPPED)))
    }

    fn send_xembed(&mut self, _window: WindowId, _message: XembedMessage) -> BackendResult<()> {
        Ok(())
    }

    fn draw_background(&mut self, _rect: Rect) -> BackendResult<()> {
        Ok(())
    }

    fn flush(&mut self) -> BackendResult<()> {
        Ok(())
    }
}

pub fn make_model() -> TrayModel {
    TrayModel::new(HOSTS, ATOMS)
}
