//! Music Catalog Storage
//!
//! `SQLite` database layer for the music catalog.
//!
//! # Architecture
//!
//! - **Single Table**: every record lives in `musics`, created by the embedded migrations
//! - **Vertical Slicing**: each concern owns its own queries (`musics`, `stats`)
//! - **Trait Seam**: [`LocalStorageContext`] implements [`catalog_core::MusicStore`]
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_storage::{create_pool, run_migrations, LocalStorageContext};
//! use catalog_core::{MusicStore, MusicFilter, Sort, SortField};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://catalog.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let popular = storage
//!     .find_all(&MusicFilter::default(), Sort::desc(SortField::PlayCount), Some(10))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod musics;
pub mod stats;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://catalog.db`)
/// * `max_connections` - Upper bound on pooled connections
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created");

    Ok(pool)
}
