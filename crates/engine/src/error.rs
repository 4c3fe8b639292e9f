//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when no row matches the requested id.
//! - [`IdMismatch`] thrown when an update targets one id with a record carrying another.
//! - [`Conflict`] thrown when the store refused a write because the row changed underneath.
//! - [`InvalidField`] thrown when a record does not fit the column constraints.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`IdMismatch`]: EngineError::IdMismatch
//!  [`Conflict`]: EngineError::Conflict
//!  [`InvalidField`]: EngineError::InvalidField
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Id mismatch: {0}")]
    IdMismatch(String),
    #[error("Concurrent update: {0}")]
    Conflict(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::IdMismatch(a), Self::IdMismatch(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
