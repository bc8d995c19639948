//! Cooperative shutdown on SIGINT / SIGTERM
//!
//! The handler only sets a flag; the poll loop checks it between batches and
//! runs the normal shutdown sequence.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_signal(_signal: nix::libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Install handlers for SIGINT and SIGTERM
#[cfg(unix)]
pub fn install() -> nix::Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only touches an atomic
        unsafe { sigaction(signal, &action) }?;
    }
    tracing::debug!("Installed SIGINT/SIGTERM handlers");
    Ok(())
}

pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Ask the run loop to stop after the current batch
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
}
