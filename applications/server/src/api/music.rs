/// Music API routes
use crate::{
    config::ApiSettings,
    dto::{MusicRequest, MusicResponse},
    error::{Result, ServerError},
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use catalog_core::types::{CatalogStats, MusicFilter, MusicId, Page, PageRequest, Sort};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `field[,asc|desc]`
    pub sort: Option<String>,
}

impl PageQuery {
    /// Resolve paging against the configured limits
    ///
    /// A missing size falls back to the default, an oversized one is clamped.
    pub fn resolve(&self, api: &ApiSettings) -> Result<(PageRequest, Option<Sort>)> {
        let size = match self.size {
            Some(0) => {
                return Err(ServerError::BadRequest(
                    "size must be at least 1".to_string(),
                ))
            }
            Some(size) => size.min(api.max_page_size),
            None => api.default_page_size,
        };

        let sort = self
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Sort>)
            .transpose()?;

        Ok((PageRequest::new(self.page.unwrap_or(0), size), sort))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub top: Option<u32>,
}

fn default_stats_top() -> u32 {
    5
}

/// Query string of `GET /api/music/filter`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub query: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub exact_artist: Option<String>,
    pub exact_album: Option<String>,
    pub year: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub min_play_count: Option<i64>,
    pub has_url: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl FilterQuery {
    fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    fn into_filter(self) -> MusicFilter {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        MusicFilter {
            query: non_blank(self.query),
            title: non_blank(self.title),
            artist: non_blank(self.artist),
            album: non_blank(self.album),
            genre: non_blank(self.genre),
            exact_artist: non_blank(self.exact_artist),
            exact_album: non_blank(self.exact_album),
            year_from: self.year_from.or(self.year),
            year_to: self.year_to.or(self.year),
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            min_play_count: self.min_play_count,
            has_url: self.has_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// GET /api/music
pub async fn list_musics(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Page<MusicResponse>>> {
    let (page, sort) = query.resolve(&app_state.api)?;
    let musics = app_state.music_service.get_all_musics(page, sort).await?;
    Ok(Json(musics))
}

/// GET /api/music/:id
pub async fn get_music(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MusicId>,
) -> Result<Json<MusicResponse>> {
    let music = app_state.music_service.get_music_by_id(id).await?;
    Ok(Json(music))
}

/// POST /api/music
pub async fn create_music(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<MusicRequest>,
) -> Result<(StatusCode, Json<MusicResponse>)> {
    let music = app_state.music_service.add_music(request).await?;
    Ok((StatusCode::CREATED, Json(music)))
}

/// PUT /api/music/:id
pub async fn update_music(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MusicId>,
    ApiJson(request): ApiJson<MusicRequest>,
) -> Result<Json<MusicResponse>> {
    let music = app_state.music_service.update_music(id, request).await?;
    Ok(Json(music))
}

/// DELETE /api/music/:id
pub async fn delete_music(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MusicId>,
) -> Result<StatusCode> {
    app_state.music_service.delete_music(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/music/:id/play
pub async fn play_music(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MusicId>,
) -> Result<Json<MusicResponse>> {
    let music = app_state.music_service.play_music(id).await?;
    Ok(Json(music))
}

/// GET /api/music/search?query=
pub async fn search_musics(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Page<MusicResponse>>> {
    let SearchQuery {
        query,
        page,
        size,
        sort,
    } = query;
    let text =
        query.ok_or_else(|| ServerError::BadRequest("query parameter is required".to_string()))?;
    let (page, sort) = PageQuery { page, size, sort }.resolve(&app_state.api)?;

    let musics = app_state
        .music_service
        .search_musics(&text, page, sort)
        .await?;
    Ok(Json(musics))
}

/// GET /api/music/artist/:artist
pub async fn musics_by_artist(
    State(app_state): State<AppState>,
    ApiPath(artist): ApiPath<String>,
) -> Result<Json<Vec<MusicResponse>>> {
    let musics = app_state.music_service.get_musics_by_artist(&artist).await?;
    if musics.is_empty() {
        return Err(ServerError::NotFound(format!(
            "No music found for artist: {artist}"
        )));
    }
    Ok(Json(musics))
}

/// GET /api/music/genre/:genre
pub async fn musics_by_genre(
    State(app_state): State<AppState>,
    ApiPath(genre): ApiPath<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Page<MusicResponse>>> {
    let (page, sort) = query.resolve(&app_state.api)?;
    let musics = app_state
        .music_service
        .get_musics_by_genre(&genre, page, sort)
        .await?;
    Ok(Json(musics))
}

/// GET /api/music/popular?limit=
pub async fn popular_musics(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<Vec<MusicResponse>>> {
    let limit = query
        .limit
        .unwrap_or(app_state.api.default_leaderboard_limit);
    let musics = app_state.music_service.get_popular_musics(limit).await?;
    Ok(Json(musics))
}

/// GET /api/music/recent?limit=
pub async fn recent_musics(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<Vec<MusicResponse>>> {
    let limit = query
        .limit
        .unwrap_or(app_state.api.default_leaderboard_limit);
    let musics = app_state.music_service.get_recent_musics(limit).await?;
    Ok(Json(musics))
}

/// GET /api/music/genres
pub async fn list_genres(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(app_state.music_service.get_all_genres().await?))
}

/// GET /api/music/artists
pub async fn list_artists(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(app_state.music_service.get_all_artists().await?))
}

/// GET /api/music/albums
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(app_state.music_service.get_all_albums().await?))
}

/// GET /api/music/filter
pub async fn filter_musics(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> Result<Json<Page<MusicResponse>>> {
    let (page, sort) = query.paging().resolve(&app_state.api)?;
    let filter = query.into_filter();

    let musics = app_state
        .music_service
        .filter_musics(&filter, page, sort)
        .await?;
    Ok(Json(musics))
}

/// GET /api/music/artist/:artist/count
pub async fn count_by_artist(
    State(app_state): State<AppState>,
    ApiPath(artist): ApiPath<String>,
) -> Result<Json<CountResponse>> {
    let count = app_state.music_service.count_by_artist(&artist).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/music/genre/:genre/count
pub async fn count_by_genre(
    State(app_state): State<AppState>,
    ApiPath(genre): ApiPath<String>,
) -> Result<Json<CountResponse>> {
    let count = app_state.music_service.count_by_genre(&genre).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/music/stats?top=
pub async fn stats(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> Result<Json<CatalogStats>> {
    let top = query.top.unwrap_or_else(default_stats_top);
    let stats = app_state.music_service.get_stats(top).await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults_and_clamps() {
        let api = ApiSettings::default();

        let (page, sort) = PageQuery::default().resolve(&api).unwrap();
        assert_eq!(page, PageRequest::new(0, 20));
        assert!(sort.is_none());

        let oversized = PageQuery {
            page: Some(2),
            size: Some(10_000),
            sort: Some("playCount,desc".to_string()),
        };
        let (page, sort) = oversized.resolve(&api).unwrap();
        assert_eq!(page, PageRequest::new(2, 100));
        assert_eq!(sort, Some("playCount,desc".parse().unwrap()));
    }

    #[test]
    fn test_page_query_rejects_zero_size_and_unknown_sort() {
        let api = ApiSettings::default();

        let zero = PageQuery {
            size: Some(0),
            ..PageQuery::default()
        };
        assert!(matches!(zero.resolve(&api), Err(ServerError::BadRequest(_))));

        let unknown = PageQuery {
            sort: Some("loudness".to_string()),
            ..PageQuery::default()
        };
        assert!(unknown.resolve(&api).is_err());
    }

    #[test]
    fn test_filter_query_year_sets_both_bounds() {
        let filter = FilterQuery {
            year: Some(1991),
            artist: Some("  ".to_string()),
            ..FilterQuery::default()
        }
        .into_filter();

        assert_eq!(filter.year_from, Some(1991));
        assert_eq!(filter.year_to, Some(1991));
        assert!(filter.artist.is_none());
    }
}
