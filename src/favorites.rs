//! Persisted favorites collection.
//!
//! The whole collection lives in one storage slot as a JSON array. Every
//! mutation reads the array, edits it and writes all of it back, so the
//! ids stay unique as long as nothing else writes the slot.

use std::collections::HashSet;

use log::warn;

use crate::{
    domain::{Track, TrackId},
    storage::{KeyValueStore, StorageError},
};

/// Storage key of the favorites collection.
pub const FAVORITES_KEY: &str = "songs";

pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Reads the whole collection in insertion order.
    ///
    /// An absent slot, a failed read and unparseable content all come back
    /// as an empty list.
    pub fn all_favorites(&self) -> Vec<Track> {
        self.load().unwrap_or_else(|e| {
            warn!("failed to read favorites, treating as empty: {e}");
            Vec::new()
        })
    }

    /// Loads the stored list. Only a failing substrate is an error, corrupt
    /// content reads as empty.
    fn load(&self) -> Result<Vec<Track>, StorageError> {
        let Some(raw) = self.storage.read(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };

        let tracks: Vec<Track> = match serde_json::from_str(&raw) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("stored favorites are corrupt, treating as empty: {e}");
                return Ok(Vec::new());
            }
        };

        let mut seen = HashSet::new();
        let total = tracks.len();
        let unique: Vec<Track> = tracks.into_iter().filter(|t| seen.insert(t.id)).collect();
        if unique.len() != total {
            warn!(
                "stored favorites contain {} duplicate ids, keeping first occurrences",
                total - unique.len()
            );
        }
        Ok(unique)
    }

    pub fn get_favorite(&self, id: TrackId) -> Option<Track> {
        self.all_favorites().into_iter().find(|t| t.id == id)
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.get_favorite(track.id).is_some()
    }

    /// Appends `track` unless its id is already present.
    ///
    /// Returns whether the track was stored. Nothing is written when the
    /// current collection cannot be read.
    pub fn add(&mut self, track: Track) -> bool {
        let mut tracks = match self.load() {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("failed to read favorites, not adding {}: {e}", track.id);
                return false;
            }
        };
        if tracks.contains(&track) {
            return false;
        }
        tracks.push(track);
        self.persist(&tracks)
    }

    /// Drops the track with `id`, keeping the order of the rest.
    ///
    /// Returns whether something was removed.
    pub fn remove(&mut self, id: TrackId) -> bool {
        let mut tracks = match self.load() {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("failed to read favorites, not removing {id}: {e}");
                return false;
            }
        };
        let before = tracks.len();
        tracks.retain(|t| t.id != id);
        if tracks.len() == before {
            return false;
        }
        self.persist(&tracks)
    }

    /// Writes an empty collection, whatever was there before.
    pub fn clear(&mut self) {
        self.persist(&[]);
    }

    fn persist(&mut self, tracks: &[Track]) -> bool {
        let encoded = match serde_json::to_string(tracks) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("failed to encode favorites: {e}");
                return false;
            }
        };
        match self.storage.write(FAVORITES_KEY, &encoded) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to write favorites: {e}");
                false
            }
        }
    }
}
