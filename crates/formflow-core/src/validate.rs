#![forbid(unsafe_code)]

//! Field validation rules.
//!
//! Each field has a fixed rule chain that short-circuits on the first failing
//! rule: required-check first, then format/length checks. A rule never
//! accumulates more than one error per field. All checks run against the
//! trimmed value, and character counts use Unicode scalar values, not bytes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::field::Field;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error code for a missing mandatory value.
pub const CODE_REQUIRED: &str = "required";
/// Error code for a value below its minimum character count.
pub const CODE_TOO_SHORT: &str = "too_short";
/// Error code for a value containing disallowed characters.
pub const CODE_CHARSET: &str = "charset";
/// Error code for a value that does not match its expected shape.
pub const CODE_FORMAT: &str = "format";

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("static pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

// [0-9] rather than \d: the digit class here is ASCII-only.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-\+\(\)]+$").expect("static pattern"));

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A single validation failure.
///
/// The `code` is a stable identifier for programmatic handling; the
/// `message` is the user-visible text rendered next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code.
    pub code: &'static str,
    /// User-visible error message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The outcome of checking one value. There are no other states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is acceptable.
    #[default]
    Valid,
    /// The value is rejected with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// The error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }

    /// Combine two results; the first failure wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Validate trait and built-in rules
// ---------------------------------------------------------------------------

/// A single validation rule over a raw field value.
///
/// Rules are total: any string input produces a result, never a panic.
/// Format and length rules treat an empty (after trim) value as valid;
/// requiredness is the job of [`Required`] alone, which is what makes the
/// optional phone field expressible as a chain without a required head.
pub trait Validate: Send + Sync {
    /// Check the given raw value.
    fn check(&self, value: &str) -> ValidationResult;
}

/// Rejects values that are empty after trimming.
#[derive(Debug, Clone)]
pub struct Required {
    message: &'static str,
}

impl Required {
    /// Create a `Required` rule with the field's own message.
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl Validate for Required {
    fn check(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(ValidationError::new(CODE_REQUIRED, self.message))
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects trimmed values shorter than `min` characters.
#[derive(Debug, Clone)]
pub struct MinChars {
    min: usize,
    code: &'static str,
    message: &'static str,
}

impl MinChars {
    /// Create a `MinChars` rule.
    #[must_use]
    pub const fn new(min: usize, message: &'static str) -> Self {
        Self {
            min,
            code: CODE_TOO_SHORT,
            message,
        }
    }
}

impl Validate for MinChars {
    fn check(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ValidationResult::Valid;
        }
        if trimmed.chars().count() < self.min {
            ValidationResult::Invalid(ValidationError::new(self.code, self.message))
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects trimmed values that do not match a pattern.
pub struct Matches {
    pattern: &'static Regex,
    code: &'static str,
    message: &'static str,
}

impl Matches {
    /// Create a `Matches` rule over a compiled pattern.
    #[must_use]
    pub fn new(pattern: &'static Regex, code: &'static str, message: &'static str) -> Self {
        Self {
            pattern,
            code,
            message,
        }
    }
}

impl Validate for Matches {
    fn check(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ValidationResult::Valid;
        }
        if self.pattern.is_match(trimmed) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(self.code, self.message))
        }
    }
}

impl fmt::Debug for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("pattern", &self.pattern.as_str())
            .field("code", &self.code)
            .finish()
    }
}

/// A fixed sequence of rules; the first failure wins.
pub struct Chain {
    rules: Vec<Box<dyn Validate>>,
}

impl Chain {
    /// Create a chain from the given rules.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Validate>>) -> Self {
        Self { rules }
    }
}

impl Validate for Chain {
    fn check(&self, value: &str) -> ValidationResult {
        for rule in &self.rules {
            let result = rule.check(value);
            if result.is_invalid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Per-field rule chains
// ---------------------------------------------------------------------------

static NAME_RULES: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(vec![
        Box::new(Required::new("Name is required")),
        Box::new(MinChars::new(2, "Name must be at least 2 characters")),
        Box::new(Matches::new(
            &NAME_PATTERN,
            CODE_CHARSET,
            "Name can only contain letters, spaces, hyphens, and apostrophes",
        )),
    ])
});

static EMAIL_RULES: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(vec![
        Box::new(Required::new("Email is required")),
        Box::new(Matches::new(
            &EMAIL_PATTERN,
            CODE_FORMAT,
            "Please enter a valid email address",
        )),
    ])
});

// Phone is optional: no required head. Both rules carry the same message.
static PHONE_RULES: LazyLock<Chain> = LazyLock::new(|| {
    const MESSAGE: &str = "Please enter a valid phone number (at least 10 digits)";
    Chain::new(vec![
        Box::new(Matches::new(&PHONE_PATTERN, CODE_FORMAT, MESSAGE)),
        Box::new(MinChars::new(10, MESSAGE)),
    ])
});

static MESSAGE_RULES: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(vec![
        Box::new(Required::new("Message is required")),
        Box::new(MinChars::new(10, "Message must be at least 10 characters")),
    ])
});

/// Validate one field's raw value against its rule chain.
///
/// Pure and deterministic: equal inputs always produce equal results.
#[must_use]
pub fn validate(field: Field, raw: &str) -> ValidationResult {
    match field {
        Field::Name => NAME_RULES.check(raw),
        Field::Email => EMAIL_RULES.check(raw),
        Field::Phone => PHONE_RULES.check(raw),
        Field::Message => MESSAGE_RULES.check(raw),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
