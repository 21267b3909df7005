//! The module contains the errors the engine can throw.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required field was blank on a manual create or edit.
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    /// The uploaded sheet could not be decoded.
    #[error("invalid sheet: {0}")]
    InvalidSheet(String),
    /// One or more write batches failed to commit. The surviving batches
    /// are not rolled back; the operation as a whole is reported failed.
    #[error("batch commit failed: {0}")]
    Batch(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidSheet(a), Self::InvalidSheet(b)) => a == b,
            (Self::Batch(a), Self::Batch(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
