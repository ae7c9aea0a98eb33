//! Errors raised while saving or loading snapshots.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Serialization(String),

    #[error("snapshot is corrupted: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
