//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Validation-class errors are raised before any request leaves the client;
//! network/backend errors abort an action and leave cached state untouched.

use std::fmt;

use crate::models::BookingStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or malformed input
    Validation(String),
    /// Room already taken or not enough stock for the requested period
    Unavailable(String),
    /// Status change not allowed by the booking lifecycle
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    /// Referenced booking/asset is not in the current data set
    NotFound(String),
    /// Action requires a logged-in user
    Unauthenticated,
    /// Request could not be sent or its response could not be read
    Network(String),
    /// Backend answered with a failure status or `success: false`
    Backend(String),
}

impl DomainError {
    /// Validation-class errors never reach the backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_)
                | DomainError::Unavailable(_)
                | DomainError::InvalidTransition { .. }
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "{}", msg),
            DomainError::Unavailable(msg) => write!(f, "{}", msg),
            DomainError::InvalidTransition { from, to } => {
                write!(f, "Status tidak dapat diubah dari {} ke {}", from, to)
            }
            DomainError::NotFound(what) => write!(f, "{} tidak ditemukan", what),
            DomainError::Unauthenticated => write!(f, "Silakan login terlebih dahulu"),
            DomainError::Network(msg) => write!(f, "Network error: {}", msg),
            DomainError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from reqwest errors (used in infrastructure layer)
impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Network(e.to_string())
    }
}
