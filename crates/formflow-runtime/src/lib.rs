#![forbid(unsafe_code)]

//! The FormFlow submission workflow.
//!
//! This crate orchestrates the contact-form lifecycle around the pure rules
//! in `formflow-core`:
//!
//! - [`surface::Surface`]: the injected UI-tree capability the workflow
//!   presents through (field reads, error marks, focus, busy state,
//!   form-level notices). No module here reaches for ambient globals.
//! - [`controller::FormController`]: the per-attempt state machine, covering
//!   blur/input validation, full-form validation on submit, focus management,
//!   loading state, and the success/failure transition.
//! - [`program::FormPump`] / [`program::FormProgram`]: execute the
//!   controller's delivery command on a background thread and feed the result
//!   back in as an event.
//! - [`transport::Transport`]: the delivery seam, with a simulated
//!   implementation in this crate; the HTTP implementation lives in
//!   `formflow-http`.

pub mod controller;
pub mod event;
pub mod program;
pub mod surface;
pub mod transport;

pub use controller::{
    Cmd, FailurePolicy, FieldState, FormController, FormPhase, NOTICE_FIX_ERRORS, NOTICE_RECEIVED,
    NOTICE_SEND_FAILED, NOTICE_SENT, SubmissionOutcome,
};
pub use event::FormEvent;
pub use program::{FormProgram, FormPump};
pub use surface::{NoticeKind, Surface, SurfaceCall, TranscriptSurface};
pub use transport::{SimulatedTransport, Transport, TransportError};
