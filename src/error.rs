//! Error types that are not validation diagnostics.
//!
//! - [`InternalError`]: the pipeline was driven out of order or an
//!   invariant established by an earlier check does not hold. These abort
//!   the whole run.
//! - [`ParseOptionError`]: bad backend or advisory names in options.
//! - [`SignatureError`]: a type signature string failed to parse.

use thiserror::Error;

use crate::base::Location;

/// Result of an operation that can only fail on an internal invariant.
pub type Fallible<T> = Result<T, InternalError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InternalError {
    #[error("{location}: type '{name}' queried before it was resolved")]
    Unresolved { location: Location, name: String },

    #[error("{location}: type '{name}' is already resolved")]
    AlreadyResolved { location: Location, name: String },

    #[error("{location}: unrecognized type '{name}'")]
    UnknownType { location: Location, name: String },

    #[error("{location}: '{name}' is not an array")]
    NotAnArray { location: Location, name: String },

    #[error("{location}: {message}")]
    Invariant { location: Location, message: String },
}

impl InternalError {
    pub fn invariant(location: &Location, message: impl Into<String>) -> Self {
        InternalError::Invariant {
            location: location.clone(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseOptionError {
    #[error("unknown backend '{0}', expected one of: java, cpp, ndk, rust")]
    UnknownBackend(String),

    #[error("unknown diagnostic '{0}', expected one of: enum-zero, inout-parameter, interface-name")]
    UnknownDiagnostic(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("unexpected character '{text}' at offset {offset}")]
    InvalidToken { text: String, offset: usize },

    #[error("expected {expected} at offset {offset}")]
    Expected { expected: &'static str, offset: usize },

    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}
