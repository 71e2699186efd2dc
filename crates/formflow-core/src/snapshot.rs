#![forbid(unsafe_code)]

//! The form snapshot delivered on submit.

use serde::Serialize;

/// The four field values read atomically at submit time.
///
/// Values are stored trimmed. A phone left empty is `None` and serializes
/// as JSON `null`, which is the exact wire shape the submission endpoint
/// expects: `{"name": …, "email": …, "phone": null | "…", "message": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl FormSnapshot {
    /// Assemble a snapshot from raw field values, trimming each one.
    #[must_use]
    pub fn new(name: &str, email: &str, phone: &str, message: &str) -> Self {
        let phone = phone.trim();
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            message: message.trim().to_string(),
        }
    }
}
