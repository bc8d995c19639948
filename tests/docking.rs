//! Tests for dock requests: admission, embedding handshake, and placement

mod common;

use common::{dispatch, dock, test_model, Call, RecordingBackend, DRAW, MAIN, ROOT, SELECTION};
use trayhost::backend::NO_WINDOW;
use trayhost::commands::Cmd;
use trayhost::messages::{Msg, StructureMsg, TrayMsg};
use trayhost::model::MAX_ITEMS;
use trayhost::protocol::{EmbedFlags, XembedMessage};
use trayhost::view::{slot_rect, Rect};

const W1: u32 = 0x100;
const W2: u32 = 0x200;
const W3: u32 = 0x300;
const W4: u32 = 0x400;
const W5: u32 = 0x500;

fn request_dock(window: u32) -> Msg {
    Msg::Tray(TrayMsg::RequestDock(window))
}

// ============================================================================
// Accepting
// ============================================================================

#[test]
fn test_dock_mapped_client_full_sequence() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    backend.set_info(W1, 0, EmbedFlags::MAPPED.bits());

    let cmd = dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(cmd, Some(Cmd::Repaint));
    assert_eq!(model.registry.windows(), vec![W1]);
    assert_eq!(
        backend.effects(),
        vec![
            Call::Subscribe(W1),
            Call::Withdraw(W1),
            Call::Reparent(W1, DRAW, 0, 0),
            Call::SendXembed(
                W1,
                XembedMessage::EmbeddedNotify {
                    embedder: DRAW,
                    version: 0
                }
            ),
            Call::MapRaised(W1),
            Call::DrawBackground(Rect::new(7, 3, 50, 50)),
            Call::MoveResize(W1, Rect::new(8, 4, 24, 24)),
        ]
    );
}

#[test]
fn test_dock_flushes_before_reading_info() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    backend.set_info(W1, 0, 0);

    dispatch(&mut model, &mut backend, request_dock(W1));

    let reparent = backend
        .calls
        .iter()
        .position(|c| *c == Call::Reparent(W1, DRAW, 0, 0))
        .unwrap();
    let read = backend
        .calls
        .iter()
        .position(|c| *c == Call::EmbedInfo(W1))
        .unwrap();
    assert!(backend.calls[reparent..read].contains(&Call::Flush));
}

#[test]
fn test_dock_unmapped_client_stays_hidden() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    backend.set_info(W1, 0, 0);

    dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(model.registry.len(), 1);
    assert_eq!(backend.count(|c| matches!(c, Call::MapRaised(_))), 0);
    assert!(!model.registry.find(W1).unwrap().flags().is_mapped());
}

#[test]
fn test_dock_without_info_is_treated_as_mapped() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();

    dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(backend.count(|c| *c == Call::MapRaised(W1)), 1);
    assert_eq!(model.registry.find(W1).unwrap().flags(), EmbedFlags::empty());
}

#[test]
fn test_dock_negotiates_lowest_version() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    backend.set_info(W1, 7, 0);

    dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(model.registry.find(W1).unwrap().version(), 0);
    assert_eq!(
        backend.xembed_sent(W1),
        vec![XembedMessage::EmbeddedNotify {
            embedder: DRAW,
            version: 0
        }]
    );
}

#[test]
fn test_first_info_notification_after_mapped_dock_activates() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    dock(&mut model, &mut backend, W1, EmbedFlags::MAPPED.bits());
    assert_eq!(model.registry.find(W1).unwrap().flags(), EmbedFlags::empty());

    dispatch(
        &mut model,
        &mut backend,
        Msg::Structure(StructureMsg::EmbedInfoChanged(W1)),
    );

    assert_eq!(
        backend.effects(),
        vec![
            Call::MapRaised(W1),
            Call::SendXembed(W1, XembedMessage::WindowActivate),
        ]
    );
    assert!(model.registry.find(W1).unwrap().flags().is_mapped());
}

#[test]
fn test_failed_embedded_notify_still_lays_out_item() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    backend.fail_xembed = true;
    backend.set_info(W1, 0, EmbedFlags::MAPPED.bits());

    let cmd = dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(cmd, Some(Cmd::Repaint));
    assert_eq!(model.registry.windows(), vec![W1]);
    assert!(backend.calls.contains(&Call::MoveResize(W1, slot_rect(0))));
}

#[test]
fn test_docking_order_determines_slots() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    for w in [W1, W2, W3] {
        dock(&mut model, &mut backend, w, 1);
    }
    dispatch(&mut model, &mut backend, request_dock(W4));

    assert_eq!(model.registry.windows(), vec![W1, W2, W3, W4]);
    let moves: Vec<_> = backend
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::MoveResize(w, r) => Some((*w, *r)),
            _ => None,
        })
        .collect();
    assert_eq!(
        moves,
        vec![
            (W1, slot_rect(0)),
            (W2, slot_rect(1)),
            (W3, slot_rect(2)),
            (W4, slot_rect(3)),
        ]
    );
}

// ============================================================================
// Rejecting
// ============================================================================

#[test]
fn test_fifth_request_is_rejected_with_reparent_to_root() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    for w in [W1, W2, W3, W4] {
        dock(&mut model, &mut backend, w, 1);
    }

    let cmd = dispatch(&mut model, &mut backend, request_dock(W5));

    assert_eq!(cmd, None);
    assert_eq!(model.registry.len(), MAX_ITEMS);
    assert!(!model.registry.contains(W5));
    assert_eq!(
        backend.calls,
        vec![Call::Reparent(W5, ROOT, 0, 0), Call::Flush]
    );
}

#[test]
fn test_duplicate_request_is_ignored() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    dock(&mut model, &mut backend, W1, 1);

    let cmd = dispatch(&mut model, &mut backend, request_dock(W1));

    assert_eq!(cmd, None);
    assert_eq!(model.registry.len(), 1);
    assert!(backend.calls.is_empty());
}

#[test]
fn test_duplicate_on_full_tray_is_not_bounced() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    for w in [W1, W2, W3, W4] {
        dock(&mut model, &mut backend, w, 1);
    }

    dispatch(&mut model, &mut backend, request_dock(W2));

    assert!(backend.calls.is_empty());
    assert_eq!(model.registry.windows(), vec![W1, W2, W3, W4]);
}

#[test]
fn test_invalid_windows_are_ignored() {
    let mut model = test_model();
    let mut backend = RecordingBackend::new();

    for w in [NO_WINDOW, MAIN, DRAW, SELECTION] {
        assert_eq!(dispatch(&mut model, &mut backend, request_dock(w)), None);
    }

    assert!(model.registry.is_empty());
    assert!(backend.calls.is_empty());
}

#[test]
fn test_slot_freed_by_removal_can_be_reused() {
    use trayhost::messages::{DetachReason, StructureMsg};

    let mut model = test_model();
    let mut backend = RecordingBackend::new();
    for w in [W1, W2, W3, W4] {
        dock(&mut model, &mut backend, w, 1);
    }

    dispatch(
        &mut model,
        &mut backend,
        Msg::Structure(StructureMsg::Detached {
            window: W2,
            reason: DetachReason::Destroyed,
        }),
    );
    dispatch(&mut model, &mut backend, request_dock(W5));

    assert_eq!(model.registry.windows(), vec![W1, W3, W4, W5]);
}
