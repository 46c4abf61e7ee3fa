// src/application/view_models/my_space.rs
//
// My Space: the user's saved movies and shows, four independent lists.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::ErrorSlot;
use crate::domain::{CatalogSnapshot, LocalEntity, MediaKind, SavedFlag};
use crate::error::AppResult;
use crate::services::{MovieService, TvService};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MySpaceState {
    pub favorite_movies: Vec<LocalEntity>,
    pub watchlist_movies: Vec<LocalEntity>,
    pub favorite_shows: Vec<LocalEntity>,
    pub watchlist_shows: Vec<LocalEntity>,
}

pub struct MySpaceViewModel {
    movies: Arc<MovieService>,
    shows: Arc<TvService>,
    errors: ErrorSlot,
    state: watch::Sender<MySpaceState>,
}

impl MySpaceViewModel {
    pub fn new(movies: Arc<MovieService>, shows: Arc<TvService>) -> Self {
        let (state, _) = watch::channel(MySpaceState::default());
        Self {
            movies,
            shows,
            errors: ErrorSlot::new(),
            state,
        }
    }

    pub fn state(&self) -> MySpaceState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MySpaceState> {
        self.state.subscribe()
    }

    /// Re-read all four lists. Each query stands alone: a failed one keeps
    /// its previous contents and reports, the others still publish.
    pub fn refresh(&self) {
        self.publish("favorite movies", self.movies.favorites(), |s, v| {
            s.favorite_movies = v
        });
        self.publish("movie watch list", self.movies.watchlist(), |s, v| {
            s.watchlist_movies = v
        });
        self.publish("favorite shows", self.shows.favorites(), |s, v| {
            s.favorite_shows = v
        });
        self.publish("show watch list", self.shows.watchlist(), |s, v| {
            s.watchlist_shows = v
        });
    }

    /// Unset one flag of a saved entry and reload the lists.
    ///
    /// The entry may be stale; the store decides whether the flag is still set.
    pub fn remove(&self, entity: &LocalEntity, flag: SavedFlag) {
        let snapshot = CatalogSnapshot::from(entity);
        let result = match entity.kind {
            MediaKind::Movie => self.movies.clear_flag(&snapshot, flag),
            MediaKind::Tv => self.shows.clear_flag(&snapshot, flag),
        };
        if let Err(error) = result {
            self.errors.report("My Space", &error);
        }
        self.refresh();
    }

    pub fn error(&self) -> Option<String> {
        self.errors.current()
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.errors.subscribe()
    }

    fn publish(
        &self,
        context: &str,
        result: AppResult<Vec<LocalEntity>>,
        apply: impl FnOnce(&mut MySpaceState, Vec<LocalEntity>),
    ) {
        match result {
            Ok(entities) => self.state.send_modify(|state| apply(state, entities)),
            Err(error) => self.errors.report(context, &error),
        }
    }
}
