//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`KwhBoardError`]
//! via `#[from]`. Every variant exposes a stable [`reason_code`](KwhBoardError::reason_code)
//! so a UI can pick a message without matching on display strings.

use crate::params::ValidatorKind;

/// Top-level error for kwhboard operations.
#[derive(Debug, thiserror::Error)]
pub enum KwhBoardError {
    /// A form value failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Energy statistics could not be fetched.
    #[error("fetch error")]
    Fetch(#[from] FetchError),
}

impl KwhBoardError {
    /// Stable machine-readable reason, suitable for UI lookup.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.reason_code(),
            Self::Fetch(err) => err.reason_code(),
        }
    }
}

/// Form value validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The raw value does not parse as an integer.
    #[error("{label}: '{value}' is not an integer")]
    NotAnInteger {
        /// Human-readable field label.
        label: &'static str,
        /// Raw value as typed by the user.
        value: String,
    },

    /// The value parsed but lies outside the accepted range.
    #[error("{label}: {value} is outside {min}..={max}")]
    OutOfRange {
        label: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// No validator of the requested kind is registered.
    #[error("no {0} validator registered")]
    MissingValidator(ValidatorKind),
}

impl ValidationError {
    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::NotAnInteger { .. } => "validation.not_an_integer",
            Self::OutOfRange { .. } => "validation.out_of_range",
            Self::MissingValidator(_) => "validation.missing_validator",
        }
    }
}

/// Stats fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or HTTP-level failure.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The controller answered with a status other than `OK`.
    #[error("controller returned status '{0}'")]
    Status(String),

    /// The response body does not have the expected shape.
    #[error("malformed stats response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch.transport",
            Self::Status(_) => "fetch.status",
            Self::Malformed(_) => "fetch.malformed",
        }
    }
}
