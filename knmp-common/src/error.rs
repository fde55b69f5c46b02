//! Error type shared by the entity store, storage helpers and service bootstrap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// SQLite query, transaction or pool failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Photo staging, media store or root folder I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable config file or bad log filter
    #[error("Configuration error: {0}")]
    Config(String),

    /// No person or contact with the given id or slug
    #[error("Not found: {0}")]
    NotFound(String),

    /// A staged or media file name that would escape its directory
    #[error("Rejected file path: {0}")]
    InvalidPath(String),

    /// Wizard state that could not be encoded for the session store
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
