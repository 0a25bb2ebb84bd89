//! Error handling for ASNKit core
//!
//! All error types use `thiserror`. Validation errors identify the
//! offending field so the caller can report it back to the user;
//! they are fully recoverable and never leave partial output behind.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A user-supplied field is malformed or out of range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A sheet layout violates its geometric invariants
    #[error("Invalid sheet layout '{name}': {reason}")]
    InvalidLayout {
        /// The layout name.
        name: String,
        /// Why the layout was rejected.
        reason: String,
    },
}

impl Error {
    /// Convenience constructor for field validation failures.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
