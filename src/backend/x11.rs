//! X11 implementation of the windowing backend over `x11rb`
//!
//! Owns the connection and the host's own windows: the main top-level, the
//! Window Maker icon window (dockapp mode only) and the invisible window that
//! holds the tray selection.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use super::{Atom, EventSource, MessageData, RawEvent, SelectionClaim, WindowId, Windowing};
use crate::cli::{Geometry, StartupConfig};
use crate::error::BackendResult;
use crate::model::HostWindows;
use crate::protocol::{EmbedInfo, ProtocolAtoms, XembedMessage, CURRENT_TIME};
use crate::view::geometry::Rect;

// Atoms interned once at connect time
x11rb::atom_manager! {
    pub HostAtoms: HostAtomsCookie {
        _XEMBED,
        _XEMBED_INFO,
        _NET_SYSTEM_TRAY_OPCODE,
        _NET_SYSTEM_TRAY_MESSAGE_DATA,
        MANAGER,
    }
}

impl From<&HostAtoms> for ProtocolAtoms {
    fn from(atoms: &HostAtoms) -> Self {
        ProtocolAtoms {
            xembed: atoms._XEMBED,
            xembed_info: atoms._XEMBED_INFO,
            tray_opcode: atoms._NET_SYSTEM_TRAY_OPCODE,
            tray_message_data: atoms._NET_SYSTEM_TRAY_MESSAGE_DATA,
            manager: atoms.MANAGER,
        }
    }
}

// ICCCM WM_HINTS
const WM_HINTS_WORDS: usize = 9;
const STATE_HINT: u32 = 1 << 1;
const ICON_WINDOW_HINT: u32 = 1 << 3;
const WINDOW_GROUP_HINT: u32 = 1 << 6;
const WITHDRAWN_STATE: u32 = 0;
const NORMAL_STATE: u32 = 1;

const WM_CLASS: &[u8] = b"trayhost\0TrayHost\0";

/// Event mask for the host's own windows
fn host_event_mask() -> EventMask {
    EventMask::VISIBILITY_CHANGE
        | EventMask::STRUCTURE_NOTIFY
        | EventMask::EXPOSURE
        | EventMask::PROPERTY_CHANGE
        | EventMask::KEY_PRESS
        | EventMask::KEY_RELEASE
}

pub struct X11Backend {
    conn: RustConnection,
    screen_num: usize,
    root: WindowId,
    atoms: HostAtoms,
    hosts: HostWindows,
}

impl X11Backend {
    /// Connect to the display and create the host windows
    ///
    /// `command` is recorded as `WM_COMMAND` so session managers can restart us.
    pub fn connect(config: &StartupConfig, command: &[String]) -> BackendResult<Self> {
        let (conn, screen_num) = RustConnection::connect(config.display.as_deref())?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;

        tracing::info!(
            "Connected to X11, screen {}, root window 0x{:x}, {}x{}",
            screen_num,
            root,
            screen.width_in_pixels,
            screen.height_in_pixels
        );

        let atoms = HostAtoms::new(&conn)?.reply()?;

        let main = create_host_window(&conn, root, &config.geometry)?;
        let icon = if config.window_maker {
            Some(create_host_window(&conn, root, &config.geometry)?)
        } else {
            None
        };
        let draw = icon.unwrap_or(main);

        conn.change_window_attributes(
            draw,
            &ChangeWindowAttributesAux::new().event_mask(
                host_event_mask() | EventMask::SUBSTRUCTURE_REDIRECT | EventMask::BUTTON_PRESS,
            ),
        )?;

        let selection = conn.generate_id()?;
        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            selection,
            root,
            -1,
            -1,
            1,
            1,
            0,
            WindowClass::INPUT_ONLY,
            x11rb::COPY_FROM_PARENT,
            &CreateWindowAux::new(),
        )?;

        let hosts = HostWindows {
            main,
            icon,
            draw,
            selection,
        };
        set_wm_properties(&conn, &hosts, command)?;

        conn.map_window(main)?;
        if let Some(icon) = icon {
            conn.map_window(icon)?;
        }
        conn.sync()?;

        tracing::debug!(
            "Created host windows: main 0x{:x}, draw 0x{:x}, selection 0x{:x}",
            main,
            draw,
            selection
        );

        Ok(Self {
            conn,
            screen_num,
            root,
            atoms,
            hosts,
        })
    }

    pub fn host_windows(&self) -> HostWindows {
        self.hosts
    }

    pub fn atoms(&self) -> ProtocolAtoms {
        ProtocolAtoms::from(&self.atoms)
    }

    fn send_client_message(
        &self,
        destination: WindowId,
        window: WindowId,
        message_type: Atom,
        mask: EventMask,
        data: [u32; 5],
    ) -> BackendResult<()> {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window,
            type_: message_type,
            data: ClientMessageData::from(data),
        };
        self.conn.send_event(false, destination, mask, event)?;
        Ok(())
    }
}

fn create_host_window(
    conn: &RustConnection,
    root: WindowId,
    geometry: &Geometry,
) -> BackendResult<WindowId> {
    let window = conn.generate_id()?;
    conn.create_window(
        x11rb::COPY_DEPTH_FROM_PARENT,
        window,
        root,
        geometry.x,
        geometry.y,
        geometry.width,
        geometry.height,
        0,
        WindowClass::INPUT_OUTPUT,
        x11rb::COPY_FROM_PARENT,
        &CreateWindowAux::new()
            .background_pixmap(u32::from(BackPixmap::PARENT_RELATIVE))
            .event_mask(host_event_mask()),
    )?;
    Ok(window)
}

fn set_wm_properties(
    conn: &RustConnection,
    hosts: &HostWindows,
    command: &[String],
) -> BackendResult<()> {
    let mut hints = [0u32; WM_HINTS_WORDS];
    hints[0] = STATE_HINT | WINDOW_GROUP_HINT;
    hints[2] = NORMAL_STATE;
    hints[8] = hosts.main;
    if let Some(icon) = hosts.icon {
        hints[0] |= ICON_WINDOW_HINT;
        hints[2] = WITHDRAWN_STATE;
        hints[4] = icon;
    }

    let mut command_bytes = Vec::new();
    for arg in command {
        command_bytes.extend_from_slice(arg.as_bytes());
        command_bytes.push(0);
    }

    let windows = std::iter::once(hosts.main).chain(hosts.icon);
    for window in windows {
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            b"trayhost",
        )?;
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_CLASS,
            AtomEnum::STRING,
            WM_CLASS,
        )?;
        conn.change_property32(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_HINTS,
            AtomEnum::WM_HINTS,
            &hints,
        )?;
    }

    conn.change_property8(
        PropMode::REPLACE,
        hosts.main,
        AtomEnum::WM_COMMAND,
        AtomEnum::STRING,
        &command_bytes,
    )?;
    Ok(())
}

impl Windowing for X11Backend {
    fn root(&self) -> WindowId {
        self.root
    }

    fn screen_index(&self) -> usize {
        self.screen_num
    }

    fn claim_selection(&mut self, name: &str, owner: WindowId) -> BackendResult<SelectionClaim> {
        let selection = self.conn.intern_atom(false, name.as_bytes())?.reply()?.atom;
        self.conn.set_selection_owner(owner, selection, CURRENT_TIME)?;
        let current = self.conn.get_selection_owner(selection)?.reply()?.owner;
        Ok(SelectionClaim {
            selection,
            owner: current,
        })
    }

    fn announce_manager(&mut self, selection: Atom, owner: WindowId) -> BackendResult<()> {
        self.send_client_message(
            self.root,
            self.root,
            self.atoms.MANAGER,
            EventMask::STRUCTURE_NOTIFY,
            [CURRENT_TIME, selection, owner, 0, 0],
        )
    }

    fn release_selection(&mut self, selection: Atom) -> BackendResult<()> {
        self.conn.set_selection_owner(x11rb::NONE, selection, CURRENT_TIME)?;
        Ok(())
    }

    fn subscribe(&mut self, window: WindowId) -> BackendResult<()> {
        self.conn.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new()
                .event_mask(EventMask::STRUCTURE_NOTIFY | EventMask::PROPERTY_CHANGE),
        )?;
        Ok(())
    }

    fn reparent(
        &mut self,
        window: WindowId,
        parent: WindowId,
        x: i16,
        y: i16,
    ) -> BackendResult<()> {
        self.conn.reparent_window(window, parent, x, y)?;
        Ok(())
    }

    fn withdraw(&mut self, window: WindowId) -> BackendResult<()> {
        self.conn.unmap_window(window)?;
        // ICCCM 4.1.4: tell the window manager with a synthetic UnmapNotify
        let event = UnmapNotifyEvent {
            response_type: UNMAP_NOTIFY_EVENT,
            sequence: 0,
            event: self.root,
            window,
            from_configure: false,
        };
        self.conn.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )?;
        Ok(())
    }

    fn map_raised(&mut self, window: WindowId) -> BackendResult<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        )?;
        self.conn.map_window(window)?;
        Ok(())
    }

    fn unmap(&mut self, window: WindowId) -> BackendResult<()> {
        self.conn.unmap_window(window)?;
        Ok(())
    }

    fn move_resize(&mut self, window: WindowId, rect: Rect) -> BackendResult<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .x(i32::from(rect.x))
                .y(i32::from(rect.y))
                .width(u32::from(rect.width))
                .height(u32::from(rect.height)),
        )?;
        Ok(())
    }

    fn resize(&mut self, window: WindowId, width: u16, height: u16) -> BackendResult<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .width(u32::from(width))
                .height(u32::from(height)),
        )?;
        Ok(())
    }

    fn embed_info(&mut self, window: WindowId) -> BackendResult<Option<EmbedInfo>> {
        let info = self.atoms._XEMBED_INFO;
        let reply = self
            .conn
            .get_property(false, window, info, info, 0, 2)?
            .reply()?;

        let Some(words) = reply.value32() else {
            return Ok(None);
        };
        let words: Vec<u32> = words.collect();
        Ok(EmbedInfo::from_words(&words))
    }

    fn send_xembed(&mut self, window: WindowId, message: XembedMessage) -> BackendResult<()> {
        self.send_client_message(
            window,
            window,
            self.atoms._XEMBED,
            EventMask::NO_EVENT,
            message.encode(CURRENT_TIME),
        )
    }

    fn draw_background(&mut self, rect: Rect) -> BackendResult<()> {
        self.conn.clear_area(
            false,
            self.hosts.draw,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
        )?;
        Ok(())
    }

    fn flush(&mut self) -> BackendResult<()> {
        self.conn.sync()?;
        Ok(())
    }
}

impl EventSource for X11Backend {
    fn poll_event(&mut self) -> BackendResult<Option<RawEvent>> {
        let Some(event) = self.conn.poll_for_event()? else {
            return Ok(None);
        };
        Ok(Some(translate(event)))
    }
}

/// Reduce an X event to the fields the router looks at
fn translate(event: Event) -> RawEvent {
    match event {
        Event::ClientMessage(e) => RawEvent::ClientMessage {
            window: e.window,
            message_type: e.type_,
            format: e.format,
            data: MessageData::from_bytes(e.data.as_data8()),
        },
        Event::MapRequest(e) => RawEvent::MapRequest { window: e.window },
        // Only the last of a run of exposes
        Event::Expose(e) if e.count == 0 => RawEvent::Expose { window: e.window },
        Event::PropertyNotify(e) => RawEvent::PropertyNotify {
            window: e.window,
            atom: e.atom,
        },
        Event::ConfigureNotify(e) => RawEvent::ConfigureNotify {
            window: e.window,
            width: e.width,
            height: e.height,
        },
        Event::ReparentNotify(e) => RawEvent::ReparentNotify {
            window: e.window,
            parent: e.parent,
        },
        Event::UnmapNotify(e) => RawEvent::UnmapNotify { window: e.window },
        Event::DestroyNotify(e) => RawEvent::DestroyNotify { window: e.window },
        Event::ButtonPress(e) => RawEvent::ButtonPress {
            window: e.event,
            x: e.event_x,
            y: e.event_y,
        },
        Event::KeyPress(_) | Event::KeyRelease(_) | Event::FocusIn(_) | Event::FocusOut(_) => {
            RawEvent::Input
        }
        Event::Error(e) => {
            // Clients may vanish between an event and our request about them
            tracing::debug!(target: "x11", "X error: {:?}", e);
            RawEvent::Other
        }
        _ => RawEvent::Other,
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        let windows = [Some(self.hosts.selection), self.hosts.icon, Some(self.hosts.main)];
        for window in windows.into_iter().flatten() {
            if let Err(e) = self.conn.destroy_window(window) {
                tracing::warn!("Failed to destroy window 0x{:x}: {}", window, e);
            }
        }
        if let Err(e) = self.conn.flush() {
            tracing::warn!("Failed to flush X11 connection: {}", e);
        }
    }
}
