//! The tray application: owns the model and the backend and drives the loop

use std::time::Duration;

use crate::backend::{EventSource, RawEvent, Windowing};
use crate::error::{BackendResult, OwnershipError};
use crate::model::{HostWindows, TrayModel};
use crate::protocol::ProtocolAtoms;
use crate::router::classify;
use crate::update::update;
use crate::view::{render, repaint};

use super::signals;

pub struct App<B: Windowing + EventSource> {
    model: TrayModel,
    backend: B,
    poll_interval: Duration,
}

impl<B: Windowing + EventSource> App<B> {
    /// Claim the tray selection and draw the empty tray
    ///
    /// Fails if another tray already owns the selection for this screen.
    pub fn start(
        mut backend: B,
        hosts: HostWindows,
        atoms: ProtocolAtoms,
        poll_interval: Duration,
    ) -> Result<Self, OwnershipError> {
        let mut model = TrayModel::new(hosts, atoms);
        model.claim(&mut backend)?;
        repaint(&model, &mut backend)?;

        Ok(Self {
            model,
            backend,
            poll_interval,
        })
    }

    pub fn model(&self) -> &TrayModel {
        &self.model
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Run one event to completion: classify, update, render
    ///
    /// Errors are contained to this event; the registry stays consistent.
    pub fn handle_event(&mut self, event: RawEvent) {
        let Some(msg) = classify(&event, &self.model.atoms, &self.model.hosts) else {
            tracing::trace!(target: "router", "Ignoring {:?}", event);
            return;
        };

        match update(&mut self.model, &mut self.backend, msg) {
            Ok(Some(cmd)) => {
                if let Err(e) = render(&self.model, &mut self.backend, cmd) {
                    tracing::error!("Failed to render {:?}: {}", cmd, e);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::error!("Error handling event: {}", e),
        }
    }

    /// Handle every event that is already queued; returns how many were seen
    pub fn pump(&mut self) -> BackendResult<usize> {
        let mut handled = 0;
        while let Some(event) = self.backend.poll_event()? {
            self.handle_event(event);
            handled += 1;
        }
        Ok(handled)
    }

    /// Poll until a shutdown signal arrives
    ///
    /// Losing the display connection ends the loop with an error.
    pub fn run(&mut self) -> BackendResult<()> {
        tracing::info!("Entering event loop");
        while !signals::shutdown_requested() {
            if self.pump()? == 0 {
                std::thread::sleep(self.poll_interval);
            }
        }
        tracing::info!("Shutdown requested");
        Ok(())
    }

    /// Release the selection, then hand every docked client back to the root
    pub fn shutdown(&mut self) -> BackendResult<()> {
        let docked = self.model.registry.len();
        self.model.shutdown(&mut self.backend)?;
        tracing::info!("Shut down, released {} docked item(s)", docked);
        Ok(())
    }
}
