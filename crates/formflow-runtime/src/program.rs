#![forbid(unsafe_code)]

//! Command execution: the bridge between the controller and a transport.
//!
//! [`FormPump`] runs each delivery on a spawned worker thread and collects
//! the result over a channel; the environment stays free to deliver further
//! events while the delivery is in flight. The worker closure sends exactly
//! one result per attempt (success and failure feed the same channel), which
//! is what guarantees the controller's loading-state cleanup runs once per
//! attempt.
//!
//! [`FormProgram`] is the convenience wrapper used by the demo and the
//! integration tests: controller + surface + pump behind one `handle` call.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::controller::{Cmd, FailurePolicy, FormController};
use crate::event::FormEvent;
use crate::surface::Surface;
use crate::transport::{Transport, TransportError};

// ---------------------------------------------------------------------------
// FormPump
// ---------------------------------------------------------------------------

/// Executes delivery commands against a transport.
pub struct FormPump<T: Transport> {
    transport: Arc<T>,
    tx: Sender<Result<(), TransportError>>,
    rx: Receiver<Result<(), TransportError>>,
    in_flight: usize,
}

impl<T: Transport + 'static> FormPump<T> {
    /// Create a pump around the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (tx, rx) = channel();
        Self {
            transport: Arc::new(transport),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// The transport, for inspection from tests.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Number of deliveries currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Execute a command. `Cmd::None` is a no-op; `Cmd::Deliver` spawns a
    /// worker that resolves into the pump's channel.
    pub fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Deliver(snapshot) => {
                let transport = Arc::clone(&self.transport);
                let tx = self.tx.clone();
                self.in_flight += 1;
                thread::spawn(move || {
                    let result = transport.deliver(&snapshot);
                    // The receiver only disappears when the pump is dropped;
                    // a late resolution is then of no interest.
                    let _ = tx.send(result);
                });
            }
        }
    }

    /// A finished delivery, if one has resolved already.
    pub fn try_resolved(&mut self) -> Option<FormEvent> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.in_flight -= 1;
                Some(FormEvent::Resolved(result))
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next in-flight delivery resolves. Returns `None`
    /// when nothing is in flight.
    pub fn wait_resolved(&mut self) -> Option<FormEvent> {
        if self.in_flight == 0 {
            return None;
        }
        match self.rx.recv() {
            Ok(result) => {
                self.in_flight -= 1;
                Some(FormEvent::Resolved(result))
            }
            Err(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FormProgram
// ---------------------------------------------------------------------------

/// Controller, surface, and pump wired together.
pub struct FormProgram<S: Surface, T: Transport> {
    controller: FormController,
    surface: S,
    pump: FormPump<T>,
}

impl<S: Surface, T: Transport + 'static> FormProgram<S, T> {
    /// Wire a surface and transport under the given failure policy.
    #[must_use]
    pub fn new(surface: S, transport: T, policy: FailurePolicy) -> Self {
        Self {
            controller: FormController::new(policy),
            surface,
            pump: FormPump::new(transport),
        }
    }

    /// Feed one event through the controller and execute its command.
    pub fn handle(&mut self, event: FormEvent) {
        let cmd = self.controller.update(event, &mut self.surface);
        self.pump.run(cmd);
    }

    /// Block until every in-flight delivery has resolved and been applied.
    pub fn settle(&mut self) {
        while let Some(event) = self.pump.wait_resolved() {
            self.handle(event);
        }
    }

    /// Apply any already-resolved deliveries without blocking.
    pub fn poll(&mut self) {
        while let Some(event) = self.pump.try_resolved() {
            self.handle(event);
        }
    }

    /// The surface, for inspection.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, for scripting values between events.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The controller, for inspection.
    #[must_use]
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// The pump's transport, for inspection.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        self.pump.transport()
    }
}
