//! Storage trait for the music catalog

use crate::error::Result;
use crate::types::{CreateMusic, Music, MusicFilter, MusicId, Page, PageRequest, Sort, Tally};
use async_trait::async_trait;

/// Data access over the `musics` table
///
/// All read operations are side-effect-free. Implementations own timestamp
/// population: `created_at` on insert, `updated_at` on every write.
#[async_trait]
pub trait MusicStore: Send + Sync {
    // ========================================================================
    // Lookups
    // ========================================================================

    /// Get a record by ID
    async fn find_by_id(&self, id: MusicId) -> Result<Option<Music>>;

    /// Get a record by its url
    async fn find_by_url(&self, url: &str) -> Result<Option<Music>>;

    /// Whether a record with exactly this title and artist exists
    async fn exists_by_title_and_artist(&self, title: &str, artist: &str) -> Result<bool>;

    /// Whether a record already uses this url
    async fn exists_by_url(&self, url: &str) -> Result<bool>;

    // ========================================================================
    // Listings
    // ========================================================================

    /// One page of records matching `filter`; an empty filter lists everything
    async fn find_page(
        &self,
        filter: &MusicFilter,
        page: PageRequest,
        sort: Sort,
    ) -> Result<Page<Music>>;

    /// All records matching `filter`, optionally capped at `limit`
    async fn find_all(
        &self,
        filter: &MusicFilter,
        sort: Sort,
        limit: Option<u32>,
    ) -> Result<Vec<Music>>;

    /// Distinct non-null genres, ascending
    async fn distinct_genres(&self) -> Result<Vec<String>>;

    /// Distinct artists, ascending
    async fn distinct_artists(&self) -> Result<Vec<String>>;

    /// Distinct non-null albums, ascending
    async fn distinct_albums(&self) -> Result<Vec<String>>;

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert a new record
    async fn insert(&self, music: CreateMusic) -> Result<Music>;

    /// Replace every mutable field; `None` when the ID does not exist
    async fn update(&self, id: MusicId, music: CreateMusic) -> Result<Option<Music>>;

    /// Delete a record; `false` when the ID does not exist
    async fn delete(&self, id: MusicId) -> Result<bool>;

    /// Add one play; `None` when the ID does not exist
    async fn increment_play_count(&self, id: MusicId) -> Result<Option<Music>>;

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Number of records
    async fn count_all(&self) -> Result<i64>;

    /// Number of records with exactly this artist
    async fn count_by_artist(&self, artist: &str) -> Result<i64>;

    /// Number of records with exactly this genre
    async fn count_by_genre(&self, genre: &str) -> Result<i64>;

    /// Sum of all play counts
    async fn total_play_count(&self) -> Result<i64>;

    /// Artists with the most records
    async fn top_artists(&self, limit: u32) -> Result<Vec<Tally>>;

    /// Genres with the most records
    async fn top_genres(&self, limit: u32) -> Result<Vec<Tally>>;
}
