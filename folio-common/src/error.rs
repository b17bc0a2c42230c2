//! Error type for the Folio storage and configuration layers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database folder or config file could not be read or created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A unique column already holds the value being written
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON-encoded column (project technologies) failed to encode
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
