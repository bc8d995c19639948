//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use trayhost::backend::{
    Atom, EventSource, MessageData, RawEvent, SelectionClaim, WindowId, Windowing,
};
use trayhost::commands::Cmd;
use trayhost::error::{BackendError, BackendResult};
use x11rb::errors::ConnectionError;
use trayhost::messages::Msg;
use trayhost::model::{HostWindows, TrayModel};
use trayhost::protocol::{EmbedFlags, EmbedInfo, ProtocolAtoms, XembedMessage};
use trayhost::update::update;
use trayhost::view::{render, Rect};

pub const ROOT: WindowId = 0xff;
pub const MAIN: WindowId = 1;
pub const DRAW: WindowId = 2;
pub const SELECTION: WindowId = 3;

/// Atom handed out for `_NET_SYSTEM_TRAY_S0`
pub const TRAY_SELECTION: Atom = 20;

pub const ATOMS: ProtocolAtoms = ProtocolAtoms {
    xembed: 10,
    xembed_info: 11,
    tray_opcode: 12,
    tray_message_data: 13,
    manager: 14,
};

pub fn hosts() -> HostWindows {
    HostWindows {
        main: MAIN,
        icon: Some(DRAW),
        draw: DRAW,
        selection: SELECTION,
    }
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ClaimSelection(String, WindowId),
    AnnounceManager(Atom, WindowId),
    ReleaseSelection(Atom),
    Subscribe(WindowId),
    Reparent(WindowId, WindowId, i16, i16),
    Withdraw(WindowId),
    MapRaised(WindowId),
    Unmap(WindowId),
    MoveResize(WindowId, Rect),
    Resize(WindowId, u16, u16),
    EmbedInfo(WindowId),
    SendXembed(WindowId, XembedMessage),
    DrawBackground(Rect),
    Flush,
}

/// A `Windowing` fake that records every call instead of talking to a display
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    /// `_XEMBED_INFO` per client window; absent means no property
    pub infos: HashMap<WindowId, EmbedInfo>,
    /// Another tray that already owns the selection
    pub foreign_owner: Option<WindowId>,
    /// Inbound events for `EventSource`
    pub events: VecDeque<RawEvent>,
    /// Make every `send_xembed` fail after recording it
    pub fail_xembed: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_info(&mut self, window: WindowId, version: u32, flags: u32) {
        self.infos
            .insert(window, EmbedInfo::new(version, EmbedFlags::from_bits(flags)));
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Calls with the bookkeeping (`Flush`, `EmbedInfo` reads) filtered out
    pub fn effects(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Flush | Call::EmbedInfo(_)))
            .cloned()
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn xembed_sent(&self, window: WindowId) -> Vec<XembedMessage> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SendXembed(w, m) if *w == window => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn push_event(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }
}

impl Windowing for RecordingBackend {
    fn root(&self) -> WindowId {
        ROOT
    }

    fn screen_index(&self) -> usize {
        0
    }

    fn claim_selection(&mut self, name: &str, owner: WindowId) -> BackendResult<SelectionClaim> {
        self.calls.push(Call::ClaimSelection(name.to_string(), owner));
        Ok(SelectionClaim {
            selection: TRAY_SELECTION,
            owner: self.foreign_owner.unwrap_or(owner),
        })
    }

    fn announce_manager(&mut self, selection: Atom, owner: WindowId) -> BackendResult<()> {
        self.calls.push(Call::AnnounceManager(selection, owner));
        Ok(())
    }

    fn release_selection(&mut self, selection: Atom) -> BackendResult<()> {
        self.calls.push(Call::ReleaseSelection(selection));
        Ok(())
    }

    fn subscribe(&mut self, window: WindowId) -> BackendResult<()> {
        self.calls.push(Call::Subscribe(window));
        Ok(())
    }

    fn reparent(
        &mut self,
        window: WindowId,
        parent: WindowId,
        x: i16,
        y: i16,
    ) -> BackendResult<()> {
        self.calls.push(Call::Reparent(window, parent, x, y));
        Ok(())
    }

    fn withdraw(&mut self, window: WindowId) -> BackendResult<()> {
        self.calls.push(Call::Withdraw(window));
        Ok(())
    }

    fn map_raised(&mut self, window: WindowId) -> BackendResult<()> {
        self.calls.push(Call::MapRaised(window));
        Ok(())
    }

    fn unmap(&mut self, window: WindowId) -> BackendResult<()> {
        self.calls.push(Call::Unmap(window));
        Ok(())
    }

    fn move_resize(&mut self, window: WindowId, rect: Rect) -> BackendResult<()> {
        self.calls.push(Call::MoveResize(window, rect));
        Ok(())
    }

    fn resize(&mut self, window: WindowId, width: u16, height: u16) -> BackendResult<()> {
        self.calls.push(Call::Resize(window, width, height));
        Ok(())
    }

    fn embed_info(&mut self, window: WindowId) -> BackendResult<Option<EmbedInfo>> {
        self.calls.push(Call::EmbedInfo(window));
        Ok(self.infos.get(&window).copied())
    }

    fn send_xembed(&mut self, window: WindowId, message: XembedMessage) -> BackendResult<()> {
        self.calls.push(Call::SendXembed(window, message));
        if self.fail_xembed {
            return Err(BackendError::Connection(ConnectionError::UnknownError));
        }
        Ok(())
    }

    fn draw_background(&mut self, rect: Rect) -> BackendResult<()> {
        self.calls.push(Call::DrawBackground(rect));
        Ok(())
    }

    fn flush(&mut self) -> BackendResult<()> {
        self.calls.push(Call::Flush);
        Ok(())
    }
}

impl EventSource for RecordingBackend {
    fn poll_event(&mut self) -> BackendResult<Option<RawEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Create an empty tray model with the standard test host windows
pub fn test_model() -> TrayModel {
    TrayModel::new(hosts(), ATOMS)
}

/// Run a message through update and render, like the runtime does
pub fn dispatch(model: &mut TrayModel, backend: &mut RecordingBackend, msg: Msg) -> Option<Cmd> {
    let cmd = update(model, backend, msg).expect("update failed");
    if let Some(cmd) = cmd {
        render(model, backend, cmd).expect("render failed");
    }
    cmd
}

// ============================================================================
// Raw event builders
// ============================================================================

pub fn client_message(window: WindowId, message_type: Atom, words: [u32; 5]) -> RawEvent {
    RawEvent::ClientMessage {
        window,
        message_type,
        format: 32,
        data: MessageData::from_words(words),
    }
}

/// `_NET_SYSTEM_TRAY_OPCODE` REQUEST_DOCK as a tray icon sends it
pub fn dock_request(window: WindowId) -> RawEvent {
    client_message(window, ATOMS.tray_opcode, [0, 0, window, 0, 0])
}

pub fn message_data(window: WindowId, text: &[u8]) -> RawEvent {
    let mut bytes = [0u8; 20];
    bytes[..text.len()].copy_from_slice(text);
    RawEvent::ClientMessage {
        window,
        message_type: ATOMS.tray_message_data,
        format: 8,
        data: MessageData::from_bytes(bytes),
    }
}

/// Dock `window` with the given `_XEMBED_INFO` flags and forget the calls
pub fn dock(model: &mut TrayModel, backend: &mut RecordingBackend, window: WindowId, flags: u32) {
    backend.set_info(window, 0, flags);
    dispatch(
        model,
        backend,
        Msg::Tray(trayhost::messages::TrayMsg::RequestDock(window)),
    );
    backend.clear();
}
