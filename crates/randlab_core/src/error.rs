//! Error types for sequence generation and sampling.
//!
//! Every operation in this crate validates its inputs before doing any work,
//! so a returned error always means no partial result was produced.

use thiserror::Error;

/// Errors raised while building specs, generating uniforms or sampling.
///
/// # Examples
/// ```
/// use randlab_core::RngError;
///
/// let err = RngError::missing("x0");
/// assert_eq!(err.to_string(), "Missing parameter 'x0'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// A required field for the chosen algorithm or distribution was not supplied.
    #[error("Missing parameter '{name}'")]
    MissingParameter {
        /// Field name.
        name: String,
    },

    /// A supplied field is non-numeric, of the wrong type, or out of domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Field name.
        name: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The computation would divide by zero, never terminate or produce nothing.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

impl RngError {
    /// Create a missing parameter error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a degenerate input error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Name of the offending field, if the error is tied to one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingParameter { name } | Self::InvalidParameter { name, .. } => Some(name),
            Self::DegenerateInput(_) => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RngError>;
