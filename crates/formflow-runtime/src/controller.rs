#![forbid(unsafe_code)]

//! The submission controller state machine.
//!
//! One controller instance owns one form. Events go in, surface mutations
//! and at most one command come out:
//!
//! - `Blur(field)` validates that field and shows or clears its error.
//! - `Input(field)` clears the error once the value becomes valid again.
//! - `Submit` runs the full-form machine: validate all four fields, either
//!   reject (focus the first invalid field, show the fix-errors notice) or
//!   assemble a snapshot, enter the loading state, and emit
//!   [`Cmd::Deliver`].
//! - `Resolved(result)` presents the outcome and leaves the loading state.
//!
//! The loading state is entered *before* the delivery command is returned
//! and left exactly once per attempt when the resolution arrives; a second
//! `Submit` while a delivery is in flight is ignored.

use formflow_core::{Field, FormSnapshot, validate};

use crate::event::FormEvent;
use crate::surface::{NoticeKind, Surface};
use crate::transport::TransportError;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Form-level notice shown when submit is rejected by validation.
pub const NOTICE_FIX_ERRORS: &str = "Please fix the errors above before submitting.";

/// Form-level notice for a delivered submission.
pub const NOTICE_SENT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you within 24 hours.";

/// Form-level notice for a failed delivery under `MaskAsSuccess`.
pub const NOTICE_RECEIVED: &str =
    "Thank you! Your message has been received. We'll get back to you within 24 hours.";

/// Form-level notice for a failed delivery under `Report`.
pub const NOTICE_SEND_FAILED: &str =
    "Sorry, there was an error submitting your message. Please try again later or contact us directly.";

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// What the controller asks the runtime to do after an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// Nothing to execute.
    #[default]
    None,
    /// Deliver the snapshot through the configured transport.
    Deliver(FormSnapshot),
}

/// How a transport failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Show the failure notice and preserve field contents for retry.
    #[default]
    Report,
    /// Present the failure as a success: masked notice, fields reset. This
    /// reproduces the demo behavior of the original site.
    MaskAsSuccess,
}

/// Visible validation state of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    /// No error rendered.
    #[default]
    Clean,
    /// An error with this message is rendered.
    Invalid(String),
}

impl FieldState {
    /// Returns `true` if an error is currently rendered.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// How a finished attempt was presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(String),
    Failure(String),
}

/// Per-form phase. Only `Submitting` gates a new attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No attempt in progress.
    #[default]
    Idle,
    /// A delivery is in flight; the submission control is disabled.
    Submitting,
    /// The last attempt's outcome is on screen.
    Shown(SubmissionOutcome),
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// The per-form submission controller.
#[derive(Debug, Default)]
pub struct FormController {
    policy: FailurePolicy,
    phase: FormPhase,
    fields: [FieldState; Field::COUNT],
}

impl FormController {
    /// Create a controller with the given failure policy.
    #[must_use]
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The configured failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// The current form phase.
    #[must_use]
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The tracked state of one field.
    #[must_use]
    pub fn field_state(&self, field: Field) -> &FieldState {
        &self.fields[field.index()]
    }

    /// Feed one event through the state machine.
    pub fn update<S: Surface>(&mut self, event: FormEvent, surface: &mut S) -> Cmd {
        let _span = tracing::debug_span!("form_update", event = ?event).entered();
        match event {
            FormEvent::Blur(field) => self.on_blur(field, surface),
            FormEvent::Input(field) => self.on_input(field, surface),
            FormEvent::Submit => self.on_submit(surface),
            FormEvent::Resolved(result) => self.on_resolved(result, surface),
        }
    }

    fn on_blur<S: Surface>(&mut self, field: Field, surface: &mut S) -> Cmd {
        let result = validate(field, &surface.field_value(field));
        self.apply_field_result(field, result.error_message(), surface);
        Cmd::None
    }

    fn on_input<S: Surface>(&mut self, field: Field, surface: &mut S) -> Cmd {
        // Only a field already in error reacts to input, and only to clear;
        // new errors wait for the next blur or submit.
        if self.fields[field.index()].is_invalid()
            && validate(field, &surface.field_value(field)).is_valid()
        {
            surface.clear_field_error(field);
            self.fields[field.index()] = FieldState::Clean;
        }
        Cmd::None
    }

    fn on_submit<S: Surface>(&mut self, surface: &mut S) -> Cmd {
        if self.phase == FormPhase::Submitting {
            tracing::debug!("submit ignored: a delivery is already in flight");
            return Cmd::None;
        }

        surface.clear_notice();

        // One atomic read of all four values; validation and the snapshot
        // both work from this copy.
        let values: [String; Field::COUNT] = Field::ALL.map(|f| surface.field_value(f));
        for field in Field::ALL {
            let result = validate(field, &values[field.index()]);
            self.apply_field_result(field, result.error_message(), surface);
        }

        let first_invalid = Field::FOCUS_PRIORITY
            .into_iter()
            .find(|f| self.fields[f.index()].is_invalid());
        if let Some(field) = first_invalid {
            surface.focus_field(field);
            surface.show_notice(NoticeKind::Error, NOTICE_FIX_ERRORS);
            return Cmd::None;
        }

        let snapshot = FormSnapshot::new(
            &values[Field::Name.index()],
            &values[Field::Email.index()],
            &values[Field::Phone.index()],
            &values[Field::Message.index()],
        );

        // The control must be disabled before the delivery starts, not
        // after, or a second submit can race the first.
        self.phase = FormPhase::Submitting;
        surface.set_busy(true);
        tracing::debug!(email = %snapshot.email, "delivering form snapshot");
        Cmd::Deliver(snapshot)
    }

    fn on_resolved<S: Surface>(
        &mut self,
        result: Result<(), TransportError>,
        surface: &mut S,
    ) -> Cmd {
        if self.phase != FormPhase::Submitting {
            tracing::debug!("resolution arrived outside a submitting phase");
        }

        let outcome = match (result, self.policy) {
            (Ok(()), _) => SubmissionOutcome::Success(NOTICE_SENT.to_string()),
            (Err(error), FailurePolicy::MaskAsSuccess) => {
                tracing::warn!(%error, "delivery failed; presenting masked success");
                SubmissionOutcome::Success(NOTICE_RECEIVED.to_string())
            }
            (Err(error), FailurePolicy::Report) => {
                tracing::warn!(%error, "delivery failed");
                SubmissionOutcome::Failure(NOTICE_SEND_FAILED.to_string())
            }
        };

        match &outcome {
            SubmissionOutcome::Success(message) => {
                surface.show_notice(NoticeKind::Success, message);
                surface.reset_fields();
                for field in Field::ALL {
                    surface.clear_field_error(field);
                    self.fields[field.index()] = FieldState::Clean;
                }
                surface.reveal_notice();
            }
            SubmissionOutcome::Failure(message) => {
                // Field contents stay put so the user can retry.
                surface.show_notice(NoticeKind::Error, message);
                surface.reveal_notice();
            }
        }

        self.phase = FormPhase::Shown(outcome);
        // The loading state clears exactly once per attempt, on every path.
        surface.set_busy(false);
        Cmd::None
    }

    fn apply_field_result<S: Surface>(
        &mut self,
        field: Field,
        error_message: Option<&str>,
        surface: &mut S,
    ) {
        match error_message {
            Some(message) => {
                surface.show_field_error(field, message);
                self.fields[field.index()] = FieldState::Invalid(message.to_string());
            }
            None => {
                surface.clear_field_error(field);
                self.fields[field.index()] = FieldState::Clean;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceCall, TranscriptSurface};

    fn fill_valid(surface: &mut TranscriptSurface) {
        surface.set_value(Field::Name, "Jane Doe");
        surface.set_value(Field::Email, "jane@example.com");
        surface.set_value(Field::Phone, "");
        surface.set_value(Field::Message, "Hello, I would like a quote.");
    }

    fn submit(controller: &mut FormController, surface: &mut TranscriptSurface) -> Cmd {
        controller.update(FormEvent::Submit, surface)
    }

    // -- Blur / Input --

    #[test]
    fn blur_shows_error_for_invalid_value() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Name, "A");

        controller.update(FormEvent::Blur(Field::Name), &mut surface);

        assert_eq!(
            surface.error(Field::Name),
            Some("Name must be at least 2 characters")
        );
        assert!(controller.field_state(Field::Name).is_invalid());
    }

    #[test]
    fn blur_clears_stale_error_once_value_is_valid() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Name, "A");
        controller.update(FormEvent::Blur(Field::Name), &mut surface);

        surface.set_value(Field::Name, "Jane");
        controller.update(FormEvent::Blur(Field::Name), &mut surface);

        assert_eq!(surface.error(Field::Name), None);
        assert_eq!(*controller.field_state(Field::Name), FieldState::Clean);
    }

    #[test]
    fn input_clears_error_when_value_becomes_valid() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Email, "oops");
        controller.update(FormEvent::Blur(Field::Email), &mut surface);
        assert!(surface.error(Field::Email).is_some());

        surface.set_value(Field::Email, "jane@example.com");
        controller.update(FormEvent::Input(Field::Email), &mut surface);

        assert_eq!(surface.error(Field::Email), None);
    }

    #[test]
    fn input_keeps_error_while_value_still_invalid() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Email, "oops");
        controller.update(FormEvent::Blur(Field::Email), &mut surface);

        surface.set_value(Field::Email, "still-bad");
        controller.update(FormEvent::Input(Field::Email), &mut surface);

        assert_eq!(
            surface.error(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn input_on_clean_field_never_shows_an_error() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Email, "definitely-not-an-email");

        controller.update(FormEvent::Input(Field::Email), &mut surface);

        assert_eq!(surface.error(Field::Email), None);
        assert!(surface.calls().is_empty());
    }

    // -- Submit: rejection --

    #[test]
    fn rejected_submit_focuses_first_invalid_and_emits_no_command() {
        // Scenario A: short name, valid email, valid message.
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Name, "A");
        surface.set_value(Field::Email, "a@b.com");
        surface.set_value(Field::Message, "1234567890");

        let cmd = submit(&mut controller, &mut surface);

        assert_eq!(cmd, Cmd::None);
        assert_eq!(
            surface.error(Field::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(surface.focused(), Some(Field::Name));
        assert_eq!(
            surface.notice(),
            Some((NoticeKind::Error, NOTICE_FIX_ERRORS))
        );
        assert_eq!(*controller.phase(), FormPhase::Idle);
        assert!(!surface.is_busy());
    }

    #[test]
    fn rejection_focus_order_puts_message_before_phone() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Name, "Jane Doe");
        surface.set_value(Field::Email, "jane@example.com");
        surface.set_value(Field::Phone, "555-12");
        surface.set_value(Field::Message, "short");

        submit(&mut controller, &mut surface);

        assert_eq!(surface.focused(), Some(Field::Message));
    }

    #[test]
    fn rejected_submit_clears_errors_on_fields_that_are_valid() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        // Leave a stale error on email, then make email valid and name bad.
        surface.set_value(Field::Email, "oops");
        controller.update(FormEvent::Blur(Field::Email), &mut surface);
        surface.set_value(Field::Email, "jane@example.com");
        surface.set_value(Field::Message, "long enough message");

        submit(&mut controller, &mut surface);

        assert_eq!(surface.error(Field::Email), None);
        assert_eq!(surface.error(Field::Name), Some("Name is required"));
    }

    #[test]
    fn rejected_submit_clears_prior_notice_first() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        submit(&mut controller, &mut surface);
        let clears_before_shows = surface
            .calls()
            .iter()
            .position(|c| *c == SurfaceCall::ClearNotice)
            .unwrap()
            < surface
                .calls()
                .iter()
                .position(|c| matches!(c, SurfaceCall::ShowNotice { .. }))
                .unwrap();
        assert!(clears_before_shows);
    }

    // -- Submit: acceptance --

    #[test]
    fn valid_submit_emits_trimmed_snapshot_and_enters_loading() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        surface.set_value(Field::Name, "  Jane Doe  ");
        surface.set_value(Field::Email, " jane@example.com ");
        surface.set_value(Field::Phone, "");
        surface.set_value(Field::Message, "Hello, I would like a quote.");

        let cmd = submit(&mut controller, &mut surface);

        let Cmd::Deliver(snapshot) = cmd else {
            panic!("expected a delivery command, got {cmd:?}");
        };
        assert_eq!(snapshot.name, "Jane Doe");
        assert_eq!(snapshot.email, "jane@example.com");
        assert_eq!(snapshot.phone, None);
        assert_eq!(snapshot.message, "Hello, I would like a quote.");
        assert_eq!(*controller.phase(), FormPhase::Submitting);
        assert!(surface.is_busy());
    }

    #[test]
    fn valid_submit_with_phone_keeps_it_in_snapshot() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);
        surface.set_value(Field::Phone, "(555) 123-4567");

        let cmd = submit(&mut controller, &mut surface);

        let Cmd::Deliver(snapshot) = cmd else {
            panic!("expected a delivery command");
        };
        assert_eq!(snapshot.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn submit_while_submitting_is_ignored() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);

        let first = submit(&mut controller, &mut surface);
        assert!(matches!(first, Cmd::Deliver(_)));
        let calls_after_first = surface.calls().len();

        let second = submit(&mut controller, &mut surface);
        assert_eq!(second, Cmd::None);
        // The ignored submit performs no surface work at all.
        assert_eq!(surface.calls().len(), calls_after_first);
        assert_eq!(*controller.phase(), FormPhase::Submitting);
    }

    // -- Resolution --

    #[test]
    fn resolved_ok_shows_success_resets_fields_and_clears_loading() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);
        submit(&mut controller, &mut surface);

        controller.update(FormEvent::Resolved(Ok(())), &mut surface);

        assert_eq!(surface.notice(), Some((NoticeKind::Success, NOTICE_SENT)));
        for field in Field::ALL {
            assert_eq!(surface.field_value(field), "");
            assert_eq!(surface.error(field), None);
        }
        assert!(!surface.is_busy());
        assert_eq!(
            *controller.phase(),
            FormPhase::Shown(SubmissionOutcome::Success(NOTICE_SENT.to_string()))
        );
        assert_eq!(
            surface.count_calls(|c| *c == SurfaceCall::RevealNotice),
            1
        );
    }

    #[test]
    fn resolved_error_under_report_preserves_fields() {
        let mut controller = FormController::new(FailurePolicy::Report);
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);
        submit(&mut controller, &mut surface);

        controller.update(
            FormEvent::Resolved(Err(TransportError::Status(500))),
            &mut surface,
        );

        assert_eq!(
            surface.notice(),
            Some((NoticeKind::Error, NOTICE_SEND_FAILED))
        );
        // Contents survive for a manual retry.
        assert_eq!(surface.field_value(Field::Name), "Jane Doe");
        assert!(!surface.is_busy());
        assert_eq!(
            *controller.phase(),
            FormPhase::Shown(SubmissionOutcome::Failure(NOTICE_SEND_FAILED.to_string()))
        );
    }

    #[test]
    fn resolved_error_under_mask_presents_success_and_resets() {
        let mut controller = FormController::new(FailurePolicy::MaskAsSuccess);
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);
        submit(&mut controller, &mut surface);

        controller.update(
            FormEvent::Resolved(Err(TransportError::Transport("unreachable".into()))),
            &mut surface,
        );

        assert_eq!(
            surface.notice(),
            Some((NoticeKind::Success, NOTICE_RECEIVED))
        );
        for field in Field::ALL {
            assert_eq!(surface.field_value(field), "");
        }
        assert!(!surface.is_busy());
    }

    #[test]
    fn loading_clears_exactly_once_per_attempt() {
        for result in [Ok(()), Err(TransportError::Status(500))] {
            let mut controller = FormController::default();
            let mut surface = TranscriptSurface::new();
            fill_valid(&mut surface);
            submit(&mut controller, &mut surface);
            controller.update(FormEvent::Resolved(result), &mut surface);

            assert_eq!(
                surface.count_calls(|c| *c == SurfaceCall::SetBusy { busy: false }),
                1
            );
        }
    }

    #[test]
    fn new_attempt_allowed_after_outcome_shown() {
        let mut controller = FormController::default();
        let mut surface = TranscriptSurface::new();
        fill_valid(&mut surface);
        submit(&mut controller, &mut surface);
        controller.update(FormEvent::Resolved(Ok(())), &mut surface);

        fill_valid(&mut surface);
        let cmd = submit(&mut controller, &mut surface);
        assert!(matches!(cmd, Cmd::Deliver(_)));
    }
}
