#![forbid(unsafe_code)]

//! Events delivered to the controller.

use formflow_core::Field;

use crate::transport::TransportError;

/// An input to the submission controller.
///
/// The environment delivers these serially; the controller never sees two
/// events at once. `Blur`, `Input`, and `Submit` come from the user;
/// `Resolved` is fed back by the pump when a delivery finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Focus left a field; validate its current value.
    Blur(Field),
    /// A field's value changed; clear its error if the value became valid.
    Input(Field),
    /// The user asked to submit the form.
    Submit,
    /// A delivery attempt finished.
    Resolved(Result<(), TransportError>),
}
