//! Catalog statistics

use serde::{Deserialize, Serialize};

/// A value and how many records carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Tally {
    pub value: String,
    pub count: i64,
}

/// Aggregate view over the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_musics: i64,
    pub total_play_count: i64,
    /// Artists with the most records, descending
    pub top_artists: Vec<Tally>,
    /// Genres with the most records, descending
    pub top_genres: Vec<Tally>,
}
