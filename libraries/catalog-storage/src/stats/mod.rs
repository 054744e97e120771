//! Distinct values, counts and popularity aggregates

use catalog_core::{error::Result, types::Tally};
use sqlx::SqlitePool;

pub async fn distinct_genres(pool: &SqlitePool) -> Result<Vec<String>> {
    let genres = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT genre FROM musics WHERE genre IS NOT NULL ORDER BY genre",
    )
    .fetch_all(pool)
    .await?;

    Ok(genres)
}

pub async fn distinct_artists(pool: &SqlitePool) -> Result<Vec<String>> {
    let artists =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT artist FROM musics ORDER BY artist")
            .fetch_all(pool)
            .await?;

    Ok(artists)
}

pub async fn distinct_albums(pool: &SqlitePool) -> Result<Vec<String>> {
    let albums = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT album FROM musics WHERE album IS NOT NULL ORDER BY album",
    )
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

pub async fn count_all(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM musics")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count records with exactly this artist
pub async fn count_by_artist(pool: &SqlitePool, artist: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM musics WHERE artist = ?")
        .bind(artist)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count records with exactly this genre
pub async fn count_by_genre(pool: &SqlitePool, genre: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM musics WHERE genre = ?")
        .bind(genre)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Sum of every play count, 0 for an empty catalog
pub async fn total_play_count(pool: &SqlitePool) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(play_count), 0) FROM musics")
        .fetch_one(pool)
        .await?;

    Ok(total)
}

/// Artists ranked by number of records
pub async fn top_artists(pool: &SqlitePool, limit: u32) -> Result<Vec<Tally>> {
    let rows = sqlx::query_as::<_, Tally>(
        "SELECT artist AS value, COUNT(*) AS count
         FROM musics
         GROUP BY artist
         ORDER BY count DESC, artist ASC
         LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Genres ranked by number of records
pub async fn top_genres(pool: &SqlitePool, limit: u32) -> Result<Vec<Tally>> {
    let rows = sqlx::query_as::<_, Tally>(
        "SELECT genre AS value, COUNT(*) AS count
         FROM musics
         WHERE genre IS NOT NULL
         GROUP BY genre
         ORDER BY count DESC, genre ASC
         LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
