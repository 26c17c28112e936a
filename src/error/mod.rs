//! Error types for the AuthenTcare core.
//!
//! Each concern has its own `thiserror` enum (configuration, input validation, bulk deletion
//! authorization, schema migration) and all of them are aggregated into [`Error`], which is what
//! every store, sequencer and startup operation returns. Storage failures are wrapped together
//! with the name of the operation that failed so callers can tell which write to re-check.

pub mod authorization;
pub mod config;
pub mod validation;

use migration::MigrationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::error::{
    authorization::AuthorizationError, config::ConfigError, validation::ValidationError,
};

/// Main error type for the AuthenTcare core.
///
/// # Error Categories
/// - Validation errors, recoverable by correcting the input, never retried automatically
/// - Migration errors, fatal to startup
/// - Authorization errors, raised by the bulk deletion guard without any side effect
/// - Persistence errors, storage failures tagged with the failing operation
/// - Configuration errors (missing/invalid environment variables)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Invalid caller input, naming the offending field.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Bulk deletion refused because the confirmation secret did not match.
    #[error(transparent)]
    AuthorizationError(#[from] AuthorizationError),
    /// A schema unit could not be applied, the database must not be served.
    #[error("The database schema could not be updated: {0}")]
    MigrationError(#[from] MigrationError),
    /// Storage failure while performing `operation`.
    ///
    /// Reads may be retried freely. Writes should only be retried after checking whether the
    /// first attempt took effect.
    #[error("Failed to {operation}: {source}")]
    PersistenceError {
        operation: String,
        #[source]
        source: DbErr,
    },
}

impl From<DbErr> for Error {
    fn from(source: DbErr) -> Self {
        Self::PersistenceError {
            operation: "complete database operation".to_string(),
            source,
        }
    }
}

/// Attaches the failing operation's identity to a storage error.
pub trait PersistenceContext<T> {
    /// Converts a [`DbErr`] into [`Error::PersistenceError`] describing `operation`
    fn during(self, operation: impl Into<String>) -> Result<T, Error>;

    /// Like [`during`](Self::during), but a unique-index violation becomes
    /// [`ValidationError::Duplicate`] for `field`
    fn during_unique(
        self,
        operation: impl Into<String>,
        field: &'static str,
        value: &str,
    ) -> Result<T, Error>;
}

impl<T> PersistenceContext<T> for Result<T, DbErr> {
    fn during(self, operation: impl Into<String>) -> Result<T, Error> {
        self.map_err(|source| Error::PersistenceError {
            operation: operation.into(),
            source,
        })
    }

    fn during_unique(
        self,
        operation: impl Into<String>,
        field: &'static str,
        value: &str,
    ) -> Result<T, Error> {
        self.map_err(|source| match source.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ValidationError::Duplicate {
                field,
                value: value.to_string(),
            }
            .into(),
            _ => Error::PersistenceError {
                operation: operation.into(),
                source,
            },
        })
    }
}
