//! Music record types

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub type MusicId = i64;

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum artist length, in characters
pub const MAX_ARTIST_LEN: usize = 150;
/// Maximum album length, in characters
pub const MAX_ALBUM_LEN: usize = 150;
/// Maximum url length, in characters
pub const MAX_URL_LEN: usize = 500;
/// Maximum genre length, in characters
pub const MAX_GENRE_LEN: usize = 100;

/// A music record as persisted in the `musics` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Music {
    pub id: MusicId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Link to the stored audio; unique across the catalog when present
    pub url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub play_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Music {
    /// Duration rendered as `MM:SS`
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_seconds)
    }

    /// Whether this record carries exactly the given title/artist pair
    pub fn has_title_and_artist(&self, title: &str, artist: &str) -> bool {
        self.title == title && self.artist == artist
    }
}

/// Render a duration in seconds as `MM:SS`, `"00:00"` when unknown
pub fn format_duration(seconds: Option<i32>) -> String {
    let Some(seconds) = seconds else {
        return "00:00".to_string();
    };
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Mutable fields of a music record
///
/// Used both for inserts and for updates; an update replaces every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMusic {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
}

impl CreateMusic {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Trim the required fields and turn blank optional fields into `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            album: non_blank(self.album),
            url: non_blank(self.url),
            duration_seconds: self.duration_seconds,
            genre: non_blank(self.genre),
            release_year: self.release_year,
        }
    }

    /// Check field-level constraints
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title, MAX_TITLE_LEN)?;
        require("artist", &self.artist, MAX_ARTIST_LEN)?;
        limit("album", self.album.as_deref(), MAX_ALBUM_LEN)?;
        limit("url", self.url.as_deref(), MAX_URL_LEN)?;
        limit("genre", self.genre.as_deref(), MAX_GENRE_LEN)?;

        if let Some(duration) = self.duration_seconds {
            if duration < 0 {
                return Err(CatalogError::invalid_input(
                    "durationSeconds must not be negative",
                ));
            }
        }

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_input(format!("{field} is required")));
    }
    limit(field, Some(value), max)
}

fn limit(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(CatalogError::invalid_input(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
