//! Sort order for music listings
//!
//! The wire form is `field[,asc|desc]`, e.g. `playCount,desc`. Fields map onto
//! a fixed set of columns so the ORDER BY clause never carries user text.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sortable music fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Title,
    Artist,
    Album,
    Genre,
    ReleaseYear,
    DurationSeconds,
    PlayCount,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 10] = [
        SortField::Id,
        SortField::Title,
        SortField::Artist,
        SortField::Album,
        SortField::Genre,
        SortField::ReleaseYear,
        SortField::DurationSeconds,
        SortField::PlayCount,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Column name in the `musics` table
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::Genre => "genre",
            SortField::ReleaseYear => "release_year",
            SortField::DurationSeconds => "duration_seconds",
            SortField::PlayCount => "play_count",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Field name as it appears in JSON
    pub fn wire_name(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::Genre => "genre",
            SortField::ReleaseYear => "releaseYear",
            SortField::DurationSeconds => "durationSeconds",
            SortField::PlayCount => "playCount",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for SortField {
    type Err = CatalogError;

    /// Accepts both the JSON name (`playCount`) and the column name (`play_count`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        SortField::ALL
            .into_iter()
            .find(|f| f.wire_name().eq_ignore_ascii_case(s) || f.column().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::invalid_input(format!("Unknown sort field: {s}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CatalogError::invalid_input(format!(
                "Unknown sort direction: {other}"
            ))),
        }
    }
}

/// A single-field sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// ORDER BY body; `id` in the same direction breaks ties so paging is stable
    pub fn order_by(&self) -> String {
        let keyword = self.direction.keyword();
        if self.field == SortField::Id {
            format!("id {keyword}")
        } else {
            format!("{} {keyword}, id {keyword}", self.field.column())
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort::asc(SortField::Id)
    }
}

impl FromStr for Sort {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(2, ',');
        let field = parts.next().unwrap_or_default().parse::<SortField>()?;
        let direction = match parts.next() {
            Some(dir) if !dir.trim().is_empty() => dir.parse()?,
            _ => SortDirection::Asc,
        };
        Ok(Sort { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field.wire_name(), dir)
    }
}
