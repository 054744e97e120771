/// Music catalog service
///
/// Enforces the catalog invariants on top of a [`MusicStore`] and converts
/// stored records into their wire shape.
use crate::dto::{MusicRequest, MusicResponse};
use catalog_core::{
    error::{CatalogError, Result},
    storage::MusicStore,
    types::{
        CatalogStats, CreateMusic, MusicFilter, MusicId, Page, PageRequest, Sort, SortField,
    },
};
use std::sync::Arc;

pub struct MusicService {
    store: Arc<dyn MusicStore>,
    max_limit: u32,
}

impl MusicService {
    /// Create a service whose leaderboard limits are clamped to `max_limit`
    pub fn new(store: Arc<dyn MusicStore>, max_limit: u32) -> Self {
        Self {
            store,
            max_limit: max_limit.max(1),
        }
    }

    /// List every record, sorted by title unless `sort` says otherwise
    pub async fn get_all_musics(
        &self,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<Page<MusicResponse>> {
        let sort = sort.unwrap_or_else(|| Sort::asc(SortField::Title));
        self.find_page(&MusicFilter::default(), page, sort).await
    }

    pub async fn get_music_by_id(&self, id: MusicId) -> Result<MusicResponse> {
        let music = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::MusicNotFound(id))?;
        Ok(music.into())
    }

    /// Validate and persist a new record
    ///
    /// Fails with `Duplicate` when the title/artist pair or the url is taken.
    pub async fn add_music(&self, request: MusicRequest) -> Result<MusicResponse> {
        let music = Self::prepare(request)?;

        if self
            .store
            .exists_by_title_and_artist(&music.title, &music.artist)
            .await?
        {
            return Err(duplicate_pair(&music));
        }

        if let Some(url) = &music.url {
            if self.store.exists_by_url(url).await? {
                return Err(duplicate_url(url));
            }
        }

        let created = self.store.insert(music).await?;
        tracing::info!(id = created.id, "Added music '{}' by '{}'", created.title, created.artist);

        Ok(created.into())
    }

    /// Replace every mutable field of a record
    ///
    /// Uniqueness is only re-checked for values that actually change.
    pub async fn update_music(&self, id: MusicId, request: MusicRequest) -> Result<MusicResponse> {
        let music = Self::prepare(request)?;

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::MusicNotFound(id))?;

        if !existing.has_title_and_artist(&music.title, &music.artist)
            && self
                .store
                .exists_by_title_and_artist(&music.title, &music.artist)
                .await?
        {
            return Err(duplicate_pair(&music));
        }

        if let Some(url) = &music.url {
            if existing.url.as_deref() != Some(url.as_str()) && self.store.exists_by_url(url).await?
            {
                return Err(duplicate_url(url));
            }
        }

        let updated = self
            .store
            .update(id, music)
            .await?
            .ok_or(CatalogError::MusicNotFound(id))?;
        tracing::info!(id, "Updated music");

        Ok(updated.into())
    }

    pub async fn delete_music(&self, id: MusicId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(CatalogError::MusicNotFound(id));
        }
        tracing::info!(id, "Deleted music");
        Ok(())
    }

    /// Record one play
    pub async fn play_music(&self, id: MusicId) -> Result<MusicResponse> {
        let played = self
            .store
            .increment_play_count(id)
            .await?
            .ok_or(CatalogError::MusicNotFound(id))?;
        tracing::debug!(id, play_count = played.play_count, "Played music");
        Ok(played.into())
    }

    /// Substring search over title, artist and album
    pub async fn search_musics(
        &self,
        query: &str,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<Page<MusicResponse>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::invalid_input("query must not be blank"));
        }
        self.find_page(&MusicFilter::search(query), page, sort.unwrap_or_default())
            .await
    }

    pub async fn get_musics_by_artist(&self, artist: &str) -> Result<Vec<MusicResponse>> {
        let musics = self
            .store
            .find_all(&MusicFilter::by_artist(artist), Sort::default(), None)
            .await?;
        Ok(musics.into_iter().map(MusicResponse::from).collect())
    }

    pub async fn get_musics_by_genre(
        &self,
        genre: &str,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<Page<MusicResponse>> {
        self.find_page(&MusicFilter::by_genre(genre), page, sort.unwrap_or_default())
            .await
    }

    /// Most played records first
    pub async fn get_popular_musics(&self, limit: u32) -> Result<Vec<MusicResponse>> {
        self.leaderboard(Sort::desc(SortField::PlayCount), limit)
            .await
    }

    /// Most recently added records first
    pub async fn get_recent_musics(&self, limit: u32) -> Result<Vec<MusicResponse>> {
        self.leaderboard(Sort::desc(SortField::CreatedAt), limit)
            .await
    }

    pub async fn get_all_genres(&self) -> Result<Vec<String>> {
        self.store.distinct_genres().await
    }

    pub async fn get_all_artists(&self) -> Result<Vec<String>> {
        self.store.distinct_artists().await
    }

    pub async fn get_all_albums(&self) -> Result<Vec<String>> {
        self.store.distinct_albums().await
    }

    /// Listing narrowed by any combination of filter criteria
    pub async fn filter_musics(
        &self,
        filter: &MusicFilter,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<Page<MusicResponse>> {
        if let (Some(from), Some(to)) = (filter.year_from, filter.year_to) {
            if from > to {
                return Err(CatalogError::invalid_input(
                    "yearFrom must not be greater than yearTo",
                ));
            }
        }
        if let (Some(min), Some(max)) = (filter.min_duration, filter.max_duration) {
            if min > max {
                return Err(CatalogError::invalid_input(
                    "minDuration must not be greater than maxDuration",
                ));
            }
        }
        self.find_page(filter, page, sort.unwrap_or_default()).await
    }

    pub async fn total_musics(&self) -> Result<i64> {
        self.store.count_all().await
    }

    pub async fn count_by_artist(&self, artist: &str) -> Result<i64> {
        self.store.count_by_artist(artist).await
    }

    pub async fn count_by_genre(&self, genre: &str) -> Result<i64> {
        self.store.count_by_genre(genre).await
    }

    /// Catalog totals plus the `top` most common artists and genres
    pub async fn get_stats(&self, top: u32) -> Result<CatalogStats> {
        let top = self.clamp_limit(top)?;

        Ok(CatalogStats {
            total_musics: self.store.count_all().await?,
            total_play_count: self.store.total_play_count().await?,
            top_artists: self.store.top_artists(top).await?,
            top_genres: self.store.top_genres(top).await?,
        })
    }

    fn prepare(request: MusicRequest) -> Result<CreateMusic> {
        let music = CreateMusic::from(request).normalized();
        music.validate()?;
        Ok(music)
    }

    fn clamp_limit(&self, limit: u32) -> Result<u32> {
        if limit == 0 {
            return Err(CatalogError::invalid_input("limit must be at least 1"));
        }
        Ok(limit.min(self.max_limit))
    }

    async fn leaderboard(&self, sort: Sort, limit: u32) -> Result<Vec<MusicResponse>> {
        let limit = self.clamp_limit(limit)?;
        let musics = self
            .store
            .find_all(&MusicFilter::default(), sort, Some(limit))
            .await?;
        Ok(musics.into_iter().map(MusicResponse::from).collect())
    }

    async fn find_page(
        &self,
        filter: &MusicFilter,
        page: PageRequest,
        sort: Sort,
    ) -> Result<Page<MusicResponse>> {
        let page = self.store.find_page(filter, page, sort).await?;
        Ok(page.map(MusicResponse::from))
    }
}

fn duplicate_pair(music: &CreateMusic) -> CatalogError {
    CatalogError::duplicate(format!(
        "Music '{}' by '{}' already exists",
        music.title, music.artist
    ))
}

fn duplicate_url(url: &str) -> CatalogError {
    CatalogError::duplicate(format!("Music with url '{url}' already exists"))
}
