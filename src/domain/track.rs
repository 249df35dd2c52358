use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::id::TrackId;

/// Represent a song found in the catalog or kept in favorites.
///
/// Two tracks are equal when their ids are equal, whatever their other
/// fields say. Use [`Track::same_fields`] to compare content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default, alias = "year")]
    pub release_year: String,
    #[serde(default, alias = "cover")]
    pub cover_url: String,
}

impl Track {
    pub fn new(id: TrackId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            release_year: String::new(),
            cover_url: String::new(),
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_release_year(mut self, year: impl Into<String>) -> Self {
        self.release_year = year.into();
        self
    }

    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = url.into();
        self
    }

    /// Field-by-field comparison, unlike `==` which only looks at the id.
    pub fn same_fields(&self, other: &Track) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.artist == other.artist
            && self.album == other.album
            && self.release_year == other.release_year
            && self.cover_url == other.cover_url
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Extracts the year out of a catalog release date.
///
/// The catalog sends RFC 3339 timestamps (`2011-05-16T07:00:00Z`), plain
/// dates are accepted too. Anything else yields `None`.
pub fn release_year(date: &str) -> Option<String> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.format("%Y").to_string());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y").to_string())
}
