//! Shape of the catalog's search response and its mapping into [`Track`].

use serde::Deserialize;

use crate::domain::{Track, TrackId, track::release_year};

/// `kind` of results that are individual songs.
pub const SONG_KIND: &str = "song";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RawCatalogEntry>,
}

/// One remote record. Every field may be missing; the catalog mixes
/// songs with other media kinds under the same query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogEntry {
    pub kind: Option<String>,
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub release_date: Option<String>,
    pub artwork_url100: Option<String>,
}

impl RawCatalogEntry {
    pub fn is_song(&self) -> bool {
        self.kind.as_deref() == Some(SONG_KIND)
    }

    /// Maps a song entry into a [`Track`]; non-songs and entries without an
    /// id give `None`.
    pub fn into_track(self) -> Option<Track> {
        if !self.is_song() {
            return None;
        }
        let id = TrackId(self.track_id?);
        Some(Track {
            id,
            title: self.track_name.unwrap_or_default(),
            artist: self.artist_name.unwrap_or_default(),
            album: self.collection_name.unwrap_or_default(),
            release_year: self
                .release_date
                .as_deref()
                .and_then(release_year)
                .unwrap_or_default(),
            cover_url: self.artwork_url100.unwrap_or_default(),
        })
    }
}

impl SearchResponse {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.results
            .into_iter()
            .filter_map(RawCatalogEntry::into_track)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_full_song_entry() -> anyhow::Result<()> {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "kind": "song",
                "trackId": 1440857781,
                "trackName": "Bohemian Rhapsody",
                "artistName": "Queen",
                "collectionName": "A Night at the Opera",
                "releaseDate": "1975-10-31T12:00:00Z",
                "artworkUrl100": "https://is1-ssl.mzstatic.com/100x100bb.jpg",
                "trackPrice": 1.29
            }]
        }"#;

        let tracks = SearchResponse::parse(body)?.into_tracks();

        assert_eq!(tracks.len(), 1);
        let t = &tracks[0];
        assert_eq!(t.id, TrackId(1440857781));
        assert_eq!(t.title, "Bohemian Rhapsody");
        assert_eq!(t.artist, "Queen");
        assert_eq!(t.album, "A Night at the Opera");
        assert_eq!(t.release_year, "1975");
        assert_eq!(t.cover_url, "https://is1-ssl.mzstatic.com/100x100bb.jpg");

        Ok(())
    }

    #[test]
    fn missing_optional_fields_become_empty() -> anyhow::Result<()> {
        let body = r#"{"results":[{"kind":"song","trackId":3}]}"#;

        let tracks = SearchResponse::parse(body)?.into_tracks();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "");
        assert_eq!(tracks[0].album, "");
        assert_eq!(tracks[0].release_year, "");
        assert_eq!(tracks[0].cover_url, "");

        Ok(())
    }

    #[test]
    fn non_songs_and_idless_entries_are_dropped() -> anyhow::Result<()> {
        let body = r#"{"results":[
            {"kind":"song","trackId":1,"trackName":"A","artistName":"X"},
            {"wrapperType":"audiobook","trackName":"Book"},
            {"kind":"music-video","trackId":2},
            {"kind":"song","trackName":"no id"}
        ]}"#;

        let tracks = SearchResponse::parse(body)?.into_tracks();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, TrackId(1));

        Ok(())
    }

    #[test]
    fn missing_results_is_empty() -> anyhow::Result<()> {
        assert!(SearchResponse::parse("{}")?.into_tracks().is_empty());
        Ok(())
    }
}
