#![forbid(unsafe_code)]

//! The UI-tree capability the workflow presents through.
//!
//! The controller never touches a concrete UI. Everything it does to the
//! page (reading values, marking fields invalid, moving focus, toggling the
//! busy state, showing form-level notices) goes through the [`Surface`]
//! trait, injected at construction. Each workflow instance owns its own
//! surface binding; there is no module-level mutable state.

use formflow_core::Field;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Severity of a form-level notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The injected UI-tree provider.
///
/// Implementations are expected to confine every side effect to the one
/// element addressed: showing or clearing one field's error must not touch
/// any other field.
pub trait Surface {
    /// Read the current raw value of a field.
    fn field_value(&self, field: Field) -> String;

    /// Mark a field visually invalid, set its accessible alert role, and
    /// render the message.
    fn show_field_error(&mut self, field: Field, message: &str);

    /// Reverse everything `show_field_error` did for this field.
    fn clear_field_error(&mut self, field: Field);

    /// Move keyboard focus to a field.
    fn focus_field(&mut self, field: Field);

    /// Enter or leave the loading state: disable the submission control and
    /// show or hide the busy indicator.
    fn set_busy(&mut self, busy: bool);

    /// Render the form-level notice.
    fn show_notice(&mut self, kind: NoticeKind, message: &str);

    /// Remove the form-level notice.
    fn clear_notice(&mut self);

    /// Reset every field to empty.
    fn reset_fields(&mut self);

    /// Scroll the form-level notice into view.
    fn reveal_notice(&mut self);
}

// ---------------------------------------------------------------------------
// TranscriptSurface
// ---------------------------------------------------------------------------

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    ShowFieldError { field: Field, message: String },
    ClearFieldError { field: Field },
    FocusField { field: Field },
    SetBusy { busy: bool },
    ShowNotice { kind: NoticeKind, message: String },
    ClearNotice,
    ResetFields,
    RevealNotice,
}

/// An in-memory surface that holds field values and records every call.
///
/// Used by the test suites and the demo binary: drive the controller against
/// it, then assert on the resulting state and the call transcript.
#[derive(Debug, Default)]
pub struct TranscriptSurface {
    values: [String; Field::COUNT],
    errors: [Option<String>; Field::COUNT],
    focused: Option<Field>,
    busy: bool,
    notice: Option<(NoticeKind, String)>,
    calls: Vec<SurfaceCall>,
}

impl TranscriptSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's raw value, as the user typing would.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// The currently rendered error for a field, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors[field.index()].as_deref()
    }

    /// The field holding keyboard focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    /// Whether the submission control is currently disabled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The current form-level notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<(NoticeKind, &str)> {
        self.notice.as_ref().map(|(kind, msg)| (*kind, msg.as_str()))
    }

    /// The full call transcript, in order.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// How many recorded calls satisfy the predicate.
    #[must_use]
    pub fn count_calls(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for TranscriptSurface {
    fn field_value(&self, field: Field) -> String {
        self.values[field.index()].clone()
    }

    fn show_field_error(&mut self, field: Field, message: &str) {
        self.errors[field.index()] = Some(message.to_string());
        self.calls.push(SurfaceCall::ShowFieldError {
            field,
            message: message.to_string(),
        });
    }

    fn clear_field_error(&mut self, field: Field) {
        self.errors[field.index()] = None;
        self.calls.push(SurfaceCall::ClearFieldError { field });
    }

    fn focus_field(&mut self, field: Field) {
        self.focused = Some(field);
        self.calls.push(SurfaceCall::FocusField { field });
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.calls.push(SurfaceCall::SetBusy { busy });
    }

    fn show_notice(&mut self, kind: NoticeKind, message: &str) {
        self.notice = Some((kind, message.to_string()));
        self.calls.push(SurfaceCall::ShowNotice {
            kind,
            message: message.to_string(),
        });
    }

    fn clear_notice(&mut self) {
        self.notice = None;
        self.calls.push(SurfaceCall::ClearNotice);
    }

    fn reset_fields(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.calls.push(SurfaceCall::ResetFields);
    }

    fn reveal_notice(&mut self) {
        self.calls.push(SurfaceCall::RevealNotice);
    }
}
