/// Core error types for the music catalog
use crate::types::MusicId;
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Core error type for the music catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Music record not found
    #[error("Music not found with id: {0}")]
    MusicNotFound(MusicId),

    /// Uniqueness violation (title + artist pair, or url)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        // Only `musics.url` is UNIQUE; a concurrent write that slipped past
        // the service check lands here.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Duplicate("Music with this url already exists".to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
