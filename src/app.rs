//! Handlers behind the user-facing actions.
//!
//! [`App`] ties a search client and the favorites store together and tells
//! a [`RenderSink`] what to show. It never formats views itself.

use log::info;

use crate::{
    catalog::{CatalogSearchClient, CatalogTransport},
    domain::{Track, TrackId},
    favorites::FavoritesStore,
    storage::KeyValueStore,
};

pub const NO_FAVORITES: &str = "You have no favorites";
pub const EMPTY_KEYWORD: &str = "Please enter a search term";
pub const ALREADY_FAVORITE: &str = "Song already in favorites!";
pub const ADDED: &str = "Song added to favorites!";
pub const NOT_FAVORITE: &str = "Song not in favorites!";
pub const REMOVED: &str = "Song removed from favorites";
pub const CLEARED: &str = "Favorites cleared!";
pub const NOT_SAVED: &str = "Could not save song to favorites";

pub fn no_results(keyword: &str) -> String {
    format!("Cannot find any song matching '{keyword}'. Try something else.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStyle {
    Plain,
    Info,
    Success,
    Warning,
}

/// Whatever draws the two lists and the notifications.
pub trait RenderSink {
    fn render_search_result(&mut self, track: &Track, favorited: bool);
    fn render_favorite(&mut self, track: &Track);
    fn remove_favorite_view(&mut self, id: TrackId);
    fn clear_results_view(&mut self, placeholder: Option<&str>);
    fn clear_favorites_view(&mut self, placeholder: Option<&str>);
    fn notify(&mut self, message: &str, style: NotifyStyle);
    fn show_busy_indicator(&mut self);
}

pub struct App<T, S, R> {
    catalog: CatalogSearchClient<T>,
    favorites: FavoritesStore<S>,
    sink: R,
    search_results: Vec<Track>,
}

impl<T, S, R> App<T, S, R>
where
    T: CatalogTransport,
    S: KeyValueStore,
    R: RenderSink,
{
    pub fn new(catalog: CatalogSearchClient<T>, favorites: FavoritesStore<S>, sink: R) -> Self {
        Self {
            catalog,
            favorites,
            sink,
            search_results: Vec::new(),
        }
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    /// Results of the latest finished search.
    pub fn search_results(&self) -> &[Track] {
        &self.search_results
    }

    pub fn load_favorites(&mut self) {
        let favorites = self.favorites.all_favorites();
        self.sink
            .clear_favorites_view(favorites.is_empty().then_some(NO_FAVORITES));
        for track in &favorites {
            self.sink.render_favorite(track);
        }
    }

    pub async fn search(&mut self, input: &str) {
        let keyword = input.trim();
        if keyword.is_empty() {
            self.sink.notify(EMPTY_KEYWORD, NotifyStyle::Plain);
            return;
        }

        self.sink.show_busy_indicator();
        let results = self.catalog.search(keyword).await;
        info!("search '{keyword}' found {} songs", results.len());

        let placeholder = results.is_empty().then(|| no_results(keyword));
        self.sink.clear_results_view(placeholder.as_deref());

        let favorite_ids: Vec<TrackId> = self
            .favorites
            .all_favorites()
            .iter()
            .map(|t| t.id)
            .collect();
        for track in &results {
            self.sink
                .render_search_result(track, favorite_ids.contains(&track.id));
        }
        self.search_results = results;
    }

    /// Favorites a track from the current search results.
    ///
    /// Ids that are not among the results are ignored.
    pub fn add_favorite(&mut self, id: TrackId) {
        let Some(track) = self.search_results.iter().find(|t| t.id == id).cloned() else {
            return;
        };

        if self.favorites.contains(&track) {
            self.sink.notify(ALREADY_FAVORITE, NotifyStyle::Info);
            return;
        }

        let was_empty = self.favorites.all_favorites().is_empty();
        if !self.favorites.add(track.clone()) {
            self.sink.notify(NOT_SAVED, NotifyStyle::Warning);
            return;
        }
        if was_empty {
            self.sink.clear_favorites_view(None);
        }
        self.sink.render_favorite(&track);
        self.sink.notify(ADDED, NotifyStyle::Success);
    }

    pub fn remove_favorite(&mut self, id: TrackId) {
        if !self.favorites.remove(id) {
            self.sink.notify(NOT_FAVORITE, NotifyStyle::Warning);
            return;
        }

        self.sink.remove_favorite_view(id);
        self.sink.notify(REMOVED, NotifyStyle::Success);

        if self.favorites.all_favorites().is_empty() {
            self.sink.clear_favorites_view(Some(NO_FAVORITES));
        }
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.sink.clear_favorites_view(Some(NO_FAVORITES));
        self.sink.notify(CLEARED, NotifyStyle::Info);
    }
}
