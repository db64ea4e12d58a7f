//! Error types for cardsync-core

use thiserror::Error;

/// Result type alias using cardsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
