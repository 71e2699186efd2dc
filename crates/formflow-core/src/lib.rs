#![forbid(unsafe_code)]

//! Pure domain types for the FormFlow contact-form workflow.
//!
//! This crate holds everything that is deterministic and side-effect free:
//! the field identities, the per-field validation rules, and the snapshot
//! assembled from a valid form. Presentation and delivery live in
//! `formflow-runtime`; nothing here touches a UI tree or the network.

pub mod field;
pub mod snapshot;
pub mod validate;

pub use field::Field;
pub use snapshot::FormSnapshot;
pub use validate::{
    CODE_CHARSET, CODE_FORMAT, CODE_REQUIRED, CODE_TOO_SHORT, Chain, Matches, MinChars, Required,
    Validate, ValidationError, ValidationResult, validate,
};
