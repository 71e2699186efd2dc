#![forbid(unsafe_code)]

//! Contact-form field identities.

use std::fmt;

/// One of the four contact-form fields.
///
/// `Phone` is the only optional field; the rest are mandatory. The enum is
/// the key for every per-field operation in the workflow: validation,
/// error presentation, and focus management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    /// Number of fields on the form.
    pub const COUNT: usize = 4;

    /// All fields in form (top-to-bottom) order.
    pub const ALL: [Self; Self::COUNT] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Focus order for the rejection path: the first invalid field in this
    /// order receives keyboard focus. Message outranks Phone.
    pub const FOCUS_PRIORITY: [Self; Self::COUNT] =
        [Self::Name, Self::Email, Self::Message, Self::Phone];

    /// Stable per-field index, usable for fixed-size state arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Message => 3,
        }
    }

    /// Display label for this field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }

    /// Whether an empty value is a validation failure for this field.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Phone)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
