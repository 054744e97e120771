//! Music filter criteria

use serde::{Deserialize, Serialize};

/// Criteria for narrowing a music listing
///
/// Text fields ending in `contains` semantics match case-insensitively on a
/// substring; `exact_*` fields match the stored value exactly. All criteria
/// are combined with AND, except `query` which matches title OR artist OR album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicFilter {
    /// Substring of title, artist or album
    pub query: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub exact_artist: Option<String>,
    pub exact_album: Option<String>,
    /// Inclusive lower bound on release year
    pub year_from: Option<i32>,
    /// Inclusive upper bound on release year
    pub year_to: Option<i32>,
    /// Inclusive lower bound on duration, in seconds
    pub min_duration: Option<i32>,
    /// Inclusive upper bound on duration, in seconds
    pub max_duration: Option<i32>,
    pub min_play_count: Option<i64>,
    /// `Some(true)` keeps records with a url, `Some(false)` those without
    pub has_url: Option<bool>,
}

impl MusicFilter {
    /// Match any of title, artist or album
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn by_artist(artist: impl Into<String>) -> Self {
        Self {
            artist: Some(artist.into()),
            ..Self::default()
        }
    }

    pub fn by_genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            ..Self::default()
        }
    }

    pub fn by_album(album: impl Into<String>) -> Self {
        Self {
            album: Some(album.into()),
            ..Self::default()
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Exact artist and album pair
    pub fn by_artist_and_album(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            exact_artist: Some(artist.into()),
            exact_album: Some(album.into()),
            ..Self::default()
        }
    }

    /// Exact release year
    pub fn by_release_year(year: i32) -> Self {
        Self::default().released_between(Some(year), Some(year))
    }

    #[must_use]
    pub fn released_between(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    #[must_use]
    pub fn duration_between(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    #[must_use]
    pub fn min_plays(mut self, min: i64) -> Self {
        self.min_play_count = Some(min);
        self
    }

    #[must_use]
    pub fn with_url(mut self, has_url: bool) -> Self {
        self.has_url = Some(has_url);
        self
    }

    /// True when no criteria are set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Build a LIKE pattern matching `value` as a literal substring
///
/// `%`, `_` and the escape character itself are escaped with `\`; the query
/// must declare `ESCAPE '\'`.
pub fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(contains_pattern("rock"), "%rock%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn builders_set_expected_criteria() {
        let filter = MusicFilter::by_release_year(1999);
        assert_eq!(filter.year_from, Some(1999));
        assert_eq!(filter.year_to, Some(1999));

        let filter = MusicFilter::by_genre("jazz").min_plays(3).with_url(false);
        assert_eq!(filter.genre.as_deref(), Some("jazz"));
        assert_eq!(filter.min_play_count, Some(3));
        assert_eq!(filter.has_url, Some(false));
        assert!(!filter.is_empty());
        assert!(MusicFilter::default().is_empty());
    }
}
