// SPDX-License-Identifier: MPL-2.0
use crate::application::port::StoreError;
use crate::domain::mockup::MockupId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A project id was blank.
    InvalidProject,
    /// Another operation is in flight on the same gallery.
    Busy,
    /// The mockup is not part of the gallery's current list.
    MockupNotFound(MockupId),
    Store(StoreError),
}

impl Error {
    /// Returns the notification message key for this error.
    ///
    /// The UI layer shows a transient notification under this key when a
    /// gallery action did not complete.
    pub fn notification_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "notification-io-error",
            Error::Config(_) => "notification-config-load-error",
            Error::InvalidProject => "notification-invalid-project",
            Error::Busy => "notification-gallery-busy",
            Error::MockupNotFound(_) => "notification-mockup-missing",
            Error::Store(StoreError::Cancelled) => "notification-request-cancelled",
            Error::Store(StoreError::TimedOut) => "notification-request-timeout",
            Error::Store(_) => "notification-store-error",
        }
    }

    /// Returns `true` for failures reported by a store adapter.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::InvalidProject => write!(f, "Project id must not be empty"),
            Error::Busy => write!(f, "Gallery is busy with another operation"),
            Error::MockupNotFound(id) => write!(f, "Mockup {} is not in this gallery", id),
            Error::Store(e) => write!(f, "Store Error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
