// SPDX-License-Identifier: MPL-2.0
//! Error type shared by the store ports.

use std::fmt;

/// Errors reported by an [`ObjectStore`](super::ObjectStore) or
/// [`MetadataStore`](super::MetadataStore) adapter.
///
/// Adapters map their own failures onto these variants; callers treat them
/// as opaque transport failures and never retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    Transport(String),

    /// The backend answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    Decode(String),

    /// The addressed object or row does not exist.
    NotFound,

    /// The request was aborted through a cancellation handle.
    Cancelled,

    /// The request exceeded its deadline.
    TimedOut,

    /// Local I/O failed.
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Transport(msg) => write!(f, "Transport error: {msg}"),
            StoreError::Status { status, message } => {
                write!(f, "Backend returned {status}: {message}")
            }
            StoreError::Decode(msg) => write!(f, "Invalid response: {msg}"),
            StoreError::NotFound => write!(f, "Not found"),
            StoreError::Cancelled => write!(f, "Request cancelled"),
            StoreError::TimedOut => write!(f, "Request timed out"),
            StoreError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Result alias for port operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::Status {
            status: 409,
            message: "The resource already exists".to_string(),
        };
        assert_eq!(format!("{err}"), "Backend returned 409: The resource already exists");

        let err = StoreError::Transport("connection reset".to_string());
        assert!(format!("{err}").contains("connection reset"));

        assert_eq!(format!("{}", StoreError::Cancelled), "Request cancelled");
        assert_eq!(format!("{}", StoreError::TimedOut), "Request timed out");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let err: StoreError = std::io::Error::other("disk full").into();
        assert!(matches!(err, StoreError::Io(message) if message.contains("disk full")));
    }
}
