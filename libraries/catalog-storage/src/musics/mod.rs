//! Music record queries

use catalog_core::{
    error::Result,
    types::{contains_pattern, CreateMusic, Music, MusicFilter, MusicId, Page, PageRequest, Sort},
    CatalogError,
};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

const SELECT_MUSIC: &str = "SELECT id, title, artist, album, url, duration_seconds, genre, \
     release_year, play_count, created_at, updated_at FROM musics";

const LIKE_ESCAPE: &str = " ESCAPE '\\'";

/// Current time as stored in `created_at` / `updated_at`
///
/// RFC 3339 with millisecond precision in UTC, so text order is time order.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Lowercased form stored in the `*_folded` columns
fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Map a failed insert/update
///
/// `url` is the only UNIQUE column, so a unique violation means the url is taken.
fn write_error(err: sqlx::Error, url: Option<&str>) -> CatalogError {
    match (&err, url) {
        (sqlx::Error::Database(db_err), Some(url)) if db_err.is_unique_violation() => {
            CatalogError::duplicate(format!("Music with url '{url}' already exists"))
        }
        _ => err.into(),
    }
}

async fn fetch_by_id<'e, E>(executor: E, id: MusicId) -> Result<Option<Music>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let music = sqlx::query_as::<_, Music>(&format!("{SELECT_MUSIC} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(music)
}

/// Get music by ID
pub async fn get_by_id(pool: &SqlitePool, id: MusicId) -> Result<Option<Music>> {
    fetch_by_id(pool, id).await
}

/// Get music by url
pub async fn find_by_url(pool: &SqlitePool, url: &str) -> Result<Option<Music>> {
    let music = sqlx::query_as::<_, Music>(&format!("{SELECT_MUSIC} WHERE url = ?"))
        .bind(url)
        .fetch_optional(pool)
        .await?;

    Ok(music)
}

/// Check for an exact title + artist pair
pub async fn exists_by_title_and_artist(
    pool: &SqlitePool,
    title: &str,
    artist: &str,
) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM musics WHERE title = ? AND artist = ?)",
    )
    .bind(title)
    .bind(artist)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Check whether a url is already taken
pub async fn exists_by_url(pool: &SqlitePool, url: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM musics WHERE url = ?)")
        .bind(url)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Append the WHERE clause for `filter`
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &MusicFilter) {
    qb.push(" WHERE 1 = 1");

    // Substring matches run against the `*_folded` columns so case folding
    // covers non-ASCII letters too.
    if let Some(query) = &filter.query {
        let pattern = contains_pattern(&fold(query));
        qb.push(" AND (title_folded LIKE ")
            .push_bind(pattern.clone())
            .push(LIKE_ESCAPE)
            .push(" OR artist_folded LIKE ")
            .push_bind(pattern.clone())
            .push(LIKE_ESCAPE)
            .push(" OR album_folded LIKE ")
            .push_bind(pattern)
            .push(LIKE_ESCAPE)
            .push(")");
    }

    let substrings = [
        ("title_folded", &filter.title),
        ("artist_folded", &filter.artist),
        ("album_folded", &filter.album),
        ("genre_folded", &filter.genre),
    ];
    for (column, value) in substrings {
        if let Some(value) = value {
            qb.push(" AND ")
                .push(column)
                .push(" LIKE ")
                .push_bind(contains_pattern(&fold(value)))
                .push(LIKE_ESCAPE);
        }
    }

    if let Some(artist) = &filter.exact_artist {
        qb.push(" AND artist = ").push_bind(artist.clone());
    }
    if let Some(album) = &filter.exact_album {
        qb.push(" AND album = ").push_bind(album.clone());
    }

    if let Some(from) = filter.year_from {
        qb.push(" AND release_year >= ").push_bind(from);
    }
    if let Some(to) = filter.year_to {
        qb.push(" AND release_year <= ").push_bind(to);
    }
    if let Some(min) = filter.min_duration {
        qb.push(" AND duration_seconds >= ").push_bind(min);
    }
    if let Some(max) = filter.max_duration {
        qb.push(" AND duration_seconds <= ").push_bind(max);
    }
    if let Some(min_plays) = filter.min_play_count {
        qb.push(" AND play_count >= ").push_bind(min_plays);
    }

    match filter.has_url {
        Some(true) => {
            qb.push(" AND url IS NOT NULL");
        }
        Some(false) => {
            qb.push(" AND url IS NULL");
        }
        None => {}
    }
}

/// Count records matching a filter
pub async fn count(pool: &SqlitePool, filter: &MusicFilter) -> Result<i64> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM musics");
    push_filter(&mut qb, filter);

    let total = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

/// One page of records matching a filter
pub async fn find_page(
    pool: &SqlitePool,
    filter: &MusicFilter,
    page: PageRequest,
    sort: Sort,
) -> Result<Page<Music>> {
    let total = count(pool, filter).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_MUSIC);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY ")
        .push(sort.order_by())
        .push(" LIMIT ")
        .push_bind(i64::from(page.limit()))
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);

    let content = qb.build_query_as::<Music>().fetch_all(pool).await?;

    Ok(Page::new(content, total.max(0) as u64, page))
}

/// All records matching a filter, optionally limited
pub async fn find_all(
    pool: &SqlitePool,
    filter: &MusicFilter,
    sort: Sort,
    limit: Option<u32>,
) -> Result<Vec<Music>> {
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_MUSIC);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY ").push(sort.order_by());
    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }

    let musics = qb.build_query_as::<Music>().fetch_all(pool).await?;
    Ok(musics)
}

/// Insert a new record
pub async fn create(pool: &SqlitePool, music: CreateMusic) -> Result<Music> {
    let now = timestamp();

    let result = sqlx::query(
        "INSERT INTO musics
            (title, artist, album, url, duration_seconds, genre, release_year,
             play_count, created_at, updated_at,
             title_folded, artist_folded, album_folded, genre_folded)
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&music.title)
    .bind(&music.artist)
    .bind(&music.album)
    .bind(&music.url)
    .bind(music.duration_seconds)
    .bind(&music.genre)
    .bind(music.release_year)
    .bind(&now)
    .bind(&now)
    .bind(fold(&music.title))
    .bind(fold(&music.artist))
    .bind(music.album.as_deref().map(fold))
    .bind(music.genre.as_deref().map(fold))
    .execute(pool)
    .await
    .map_err(|e| write_error(e, music.url.as_deref()))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::storage("Failed to retrieve created music"))
}

/// Replace every mutable field of a record
///
/// Returns `None` when no record has this ID.
pub async fn update(pool: &SqlitePool, id: MusicId, music: CreateMusic) -> Result<Option<Music>> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE musics
         SET title = ?, artist = ?, album = ?, url = ?, duration_seconds = ?,
             genre = ?, release_year = ?, updated_at = ?,
             title_folded = ?, artist_folded = ?, album_folded = ?, genre_folded = ?
         WHERE id = ?",
    )
    .bind(&music.title)
    .bind(&music.artist)
    .bind(&music.album)
    .bind(&music.url)
    .bind(music.duration_seconds)
    .bind(&music.genre)
    .bind(music.release_year)
    .bind(timestamp())
    .bind(fold(&music.title))
    .bind(fold(&music.artist))
    .bind(music.album.as_deref().map(fold))
    .bind(music.genre.as_deref().map(fold))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| write_error(e, music.url.as_deref()))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let updated = fetch_by_id(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(updated)
}

/// Delete a record, returning whether it existed
pub async fn delete(pool: &SqlitePool, id: MusicId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM musics WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Add one play to a record
///
/// The increment happens in a single statement so concurrent plays are never lost.
pub async fn increment_play_count(pool: &SqlitePool, id: MusicId) -> Result<Option<Music>> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE musics SET play_count = play_count + 1, updated_at = ? WHERE id = ?",
    )
    .bind(timestamp())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let played = fetch_by_id(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(played)
}
