#![forbid(unsafe_code)]

//! The delivery seam.
//!
//! A [`Transport`] delivers a validated snapshot to wherever it goes: a
//! remote endpoint, or a simulated stand-in. Transports are `Send + Sync`
//! because the pump runs them on a worker thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use formflow_core::FormSnapshot;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a delivery attempt failed.
///
/// Never fatal: the controller absorbs every variant into the workflow's
/// failure presentation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The endpoint answered outside the 2xx window.
    #[error("endpoint returned HTTP status {0}")]
    Status(u16),
    /// The endpoint was unreachable or the connection failed mid-flight.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Delivers a form snapshot.
pub trait Transport: Send + Sync {
    /// Deliver the snapshot, blocking until the attempt resolves.
    fn deliver(&self, snapshot: &FormSnapshot) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// SimulatedTransport
// ---------------------------------------------------------------------------

/// A transport that sleeps for a configured delay and resolves with a
/// configured result.
///
/// The default mirrors the demo behavior of the site this workflow came
/// from: a 1500 ms pause, then success. Tests shrink the delay to zero and
/// can pin a failure instead.
#[derive(Debug)]
pub struct SimulatedTransport {
    delay: Duration,
    result: Result<(), TransportError>,
    deliveries: AtomicUsize,
}

impl SimulatedTransport {
    /// The delay used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    /// A transport that succeeds after the default delay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            result: Ok(()),
            deliveries: AtomicUsize::new(0),
        }
    }

    /// Override the delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Resolve every delivery with the given error instead of success.
    #[must_use]
    pub fn failing(mut self, error: TransportError) -> Self {
        self.result = Err(error);
        self
    }

    /// How many deliveries have been attempted so far.
    #[must_use]
    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimulatedTransport {
    fn deliver(&self, _snapshot: &FormSnapshot) -> Result<(), TransportError> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.result.clone()
    }
}
