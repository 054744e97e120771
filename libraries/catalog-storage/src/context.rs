use crate::{musics, stats, StorageError};
use async_trait::async_trait;
use catalog_core::{error::Result, storage::MusicStore, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool on `database_url` and bring the schema up to date
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MusicStore for LocalStorageContext {
    // Lookups
    async fn find_by_id(&self, id: MusicId) -> Result<Option<Music>> {
        musics::get_by_id(&self.pool, id).await
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Music>> {
        musics::find_by_url(&self.pool, url).await
    }

    async fn exists_by_title_and_artist(&self, title: &str, artist: &str) -> Result<bool> {
        musics::exists_by_title_and_artist(&self.pool, title, artist).await
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool> {
        musics::exists_by_url(&self.pool, url).await
    }

    // Listings
    async fn find_page(
        &self,
        filter: &MusicFilter,
        page: PageRequest,
        sort: Sort,
    ) -> Result<Page<Music>> {
        musics::find_page(&self.pool, filter, page, sort).await
    }

    async fn find_all(
        &self,
        filter: &MusicFilter,
        sort: Sort,
        limit: Option<u32>,
    ) -> Result<Vec<Music>> {
        musics::find_all(&self.pool, filter, sort, limit).await
    }

    async fn distinct_genres(&self) -> Result<Vec<String>> {
        stats::distinct_genres(&self.pool).await
    }

    async fn distinct_artists(&self) -> Result<Vec<String>> {
        stats::distinct_artists(&self.pool).await
    }

    async fn distinct_albums(&self) -> Result<Vec<String>> {
        stats::distinct_albums(&self.pool).await
    }

    // Writes
    async fn insert(&self, music: CreateMusic) -> Result<Music> {
        musics::create(&self.pool, music).await
    }

    async fn update(&self, id: MusicId, music: CreateMusic) -> Result<Option<Music>> {
        musics::update(&self.pool, id, music).await
    }

    async fn delete(&self, id: MusicId) -> Result<bool> {
        musics::delete(&self.pool, id).await
    }

    async fn increment_play_count(&self, id: MusicId) -> Result<Option<Music>> {
        musics::increment_play_count(&self.pool, id).await
    }

    // Aggregates
    async fn count_all(&self) -> Result<i64> {
        stats::count_all(&self.pool).await
    }

    async fn count_by_artist(&self, artist: &str) -> Result<i64> {
        stats::count_by_artist(&self.pool, artist).await
    }

    async fn count_by_genre(&self, genre: &str) -> Result<i64> {
        stats::count_by_genre(&self.pool, genre).await
    }

    async fn total_play_count(&self) -> Result<i64> {
        stats::total_play_count(&self.pool).await
    }

    async fn top_artists(&self, limit: u32) -> Result<Vec<Tally>> {
        stats::top_artists(&self.pool, limit).await
    }

    async fn top_genres(&self, limit: u32) -> Result<Vec<Tally>> {
        stats::top_genres(&self.pool, limit).await
    }
}
