//! Wire shapes for music records

use catalog_core::types::{format_duration, CreateMusic, Music, MusicId};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/music` and `PUT /api/music/:id`
///
/// Missing `title`/`artist` deserialize as empty strings so validation can
/// report them by name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub album: Option<String>,
    pub url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
}

impl From<MusicRequest> for CreateMusic {
    fn from(request: MusicRequest) -> Self {
        CreateMusic {
            title: request.title,
            artist: request.artist,
            album: request.album,
            url: request.url,
            duration_seconds: request.duration_seconds,
            genre: request.genre,
            release_year: request.release_year,
        }
    }
}

/// A music record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponse {
    pub id: MusicId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub url: Option<String>,
    pub duration_seconds: Option<i32>,
    /// `MM:SS`, `"00:00"` when the duration is unknown
    pub formatted_duration: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub play_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Music> for MusicResponse {
    fn from(music: Music) -> Self {
        Self {
            formatted_duration: format_duration(music.duration_seconds),
            id: music.id,
            title: music.title,
            artist: music.artist,
            album: music.album,
            url: music.url,
            duration_seconds: music.duration_seconds,
            genre: music.genre,
            release_year: music.release_year,
            play_count: music.play_count,
            created_at: music.created_at,
            updated_at: music.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_and_missing_fields() {
        let request: MusicRequest =
            serde_json::from_str(r#"{"title":"Song","durationSeconds":61,"releaseYear":1999}"#)
                .unwrap();

        assert_eq!(request.title, "Song");
        assert_eq!(request.artist, "");
        assert_eq!(request.duration_seconds, Some(61));
        assert_eq!(request.release_year, Some(1999));
        assert!(request.album.is_none());
    }

    #[test]
    fn test_response_carries_formatted_duration() {
        let music = Music {
            id: 1,
            title: "Song".to_string(),
            artist: "Band".to_string(),
            album: None,
            url: None,
            duration_seconds: Some(125),
            genre: None,
            release_year: None,
            play_count: 0,
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: "2025-01-01T00:00:00.000Z".to_string(),
        };

        let json = serde_json::to_value(MusicResponse::from(music)).unwrap();

        assert_eq!(json["formattedDuration"], "02:05");
        assert_eq!(json["durationSeconds"], 125);
        assert_eq!(json["playCount"], 0);
    }
}
