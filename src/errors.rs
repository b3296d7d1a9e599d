//! Unified error types for the configuration registry.
//!
//! Every registry failure is converted into one of these variants at the service
//! boundary so the console can render it as an inline message or a non-fatal alert.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors produced by the registry, its store adapter and settings loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or holds an unrecognized value
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the draft
        message: String,
    },

    /// Another config already uses this (normalized) key
    #[error("Key already exists: {key}")]
    DuplicateKey {
        /// The normalized key that collided
        key: String,
    },

    /// No config exists with this identifier
    #[error("Config not found: {id}")]
    NotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// The backing store could not be reached
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Connectivity failure reported by the driver
        message: String,
    },

    /// Any other failure reported by the backing store
    #[error("Database error: {0}")]
    Database(DbErr),

    /// Settings file could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the settings problem
        message: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the console can keep running after surfacing this error to the operator.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config { .. } | Self::Io(_))
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        match value {
            DbErr::Conn(e) => Self::StoreUnavailable {
                message: e.to_string(),
            },
            DbErr::ConnectionAcquire(e) => Self::StoreUnavailable {
                message: e.to_string(),
            },
            other => Self::Database(other),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
