// src/application/view_models/movie.rs
//
// Movie holder: browse feeds, search, genres and the detail screen.

use std::ops::Deref;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;

use super::{
    publish_part, DetailState, ErrorSlot, LoadOutcome, PagedFeed, SearchFeed, SearchOutcome,
    TaskScope,
};
use crate::domain::{
    CatalogSnapshot, Credits, DiscoverFilter, Genre, Images, MovieDetail, MovieList, MovieSummary,
    RegionProviders, SavedFlag, SavedFlags, Video,
};
use crate::services::MovieService;

/// Browse feeds of the movie holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieFeed {
    Discover,
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieFeed {
    fn list(self) -> Option<MovieList> {
        match self {
            MovieFeed::Discover => None,
            MovieFeed::Popular => Some(MovieList::Popular),
            MovieFeed::TopRated => Some(MovieList::TopRated),
            MovieFeed::NowPlaying => Some(MovieList::NowPlaying),
            MovieFeed::Upcoming => Some(MovieList::Upcoming),
        }
    }
}

/// Everything the movie detail screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieDetailState {
    pub id: Option<i64>,
    pub detail: Option<MovieDetail>,
    pub credits: Option<Credits>,
    pub images: Option<Images>,
    pub videos: Vec<Video>,
    pub providers: Option<RegionProviders>,
    pub certification: Option<String>,
    pub flags: SavedFlags,
}

impl DetailState for MovieDetailState {
    fn current_id(&self) -> Option<i64> {
        self.id
    }
}

/// Observable movie state. Cheap to clone; clones share every channel.
#[derive(Clone)]
pub struct MovieViewState {
    service: Arc<MovieService>,
    errors: ErrorSlot,
    discover: PagedFeed<MovieSummary>,
    popular: PagedFeed<MovieSummary>,
    top_rated: PagedFeed<MovieSummary>,
    now_playing: PagedFeed<MovieSummary>,
    upcoming: PagedFeed<MovieSummary>,
    search: SearchFeed<MovieSummary>,
    filter: Arc<Mutex<DiscoverFilter>>,
    genres: Arc<watch::Sender<Vec<Genre>>>,
    detail: Arc<watch::Sender<MovieDetailState>>,
}

impl MovieViewState {
    pub fn new(service: Arc<MovieService>) -> Self {
        let errors = ErrorSlot::new();
        let (genres, _) = watch::channel(Vec::new());
        let (detail, _) = watch::channel(MovieDetailState::default());

        Self {
            service,
            discover: PagedFeed::new("discover movies", errors.clone()),
            popular: PagedFeed::new("popular movies", errors.clone()),
            top_rated: PagedFeed::new("top rated movies", errors.clone()),
            now_playing: PagedFeed::new("now playing movies", errors.clone()),
            upcoming: PagedFeed::new("upcoming movies", errors.clone()),
            search: SearchFeed::new("movie search", errors.clone()),
            filter: Arc::new(Mutex::new(DiscoverFilter::default())),
            genres: Arc::new(genres),
            detail: Arc::new(detail),
            errors,
        }
    }

    // ------------------------------------------------------------------
    // Feeds
    // ------------------------------------------------------------------

    pub fn feed(&self, which: MovieFeed) -> &PagedFeed<MovieSummary> {
        match which {
            MovieFeed::Discover => &self.discover,
            MovieFeed::Popular => &self.popular,
            MovieFeed::TopRated => &self.top_rated,
            MovieFeed::NowPlaying => &self.now_playing,
            MovieFeed::Upcoming => &self.upcoming,
        }
    }

    pub async fn load_more(&self, which: MovieFeed) -> LoadOutcome {
        let service = Arc::clone(&self.service);
        let filter = self.discover_filter();

        self.feed(which)
            .load_next(|page| async move {
                match which.list() {
                    Some(list) => service.list(list, page).await,
                    None => service.discover(&filter, page).await,
                }
            })
            .await
    }

    pub fn discover_filter(&self) -> DiscoverFilter {
        self.filter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the discover filter and start the discover feed over.
    pub fn set_discover_filter(&self, filter: DiscoverFilter) {
        *self
            .filter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = filter;
        self.discover.reset();
    }

    pub async fn load_genres(&self) {
        match self.service.genres().await {
            Ok(genres) => {
                self.genres.send_replace(genres);
            }
            Err(error) => self.errors.report("movie genres", &error),
        }
    }

    pub fn genres(&self) -> Vec<Genre> {
        self.genres.borrow().clone()
    }

    pub fn subscribe_genres(&self) -> watch::Receiver<Vec<Genre>> {
        self.genres.subscribe()
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn search_feed(&self) -> &SearchFeed<MovieSummary> {
        &self.search
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let service = Arc::clone(&self.service);
        self.search
            .search(query, |query, page| async move {
                service.search(&query, page).await
            })
            .await
    }

    pub async fn search_more(&self) -> SearchOutcome {
        let service = Arc::clone(&self.service);
        self.search
            .load_more(|query, page| async move { service.search(&query, page).await })
            .await
    }

    // ------------------------------------------------------------------
    // Detail
    // ------------------------------------------------------------------

    pub fn detail(&self) -> MovieDetailState {
        self.detail.borrow().clone()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<MovieDetailState> {
        self.detail.subscribe()
    }

    /// Switch the detail screen to `id` and load every part concurrently.
    pub async fn open(&self, id: i64) {
        self.detail.send_replace(MovieDetailState {
            id: Some(id),
            ..Default::default()
        });
        self.load_flags(id);

        tokio::join!(
            self.load_detail(id),
            self.load_credits(id),
            self.load_images(id),
            self.load_videos(id),
            self.load_providers(id),
            self.load_certification(id),
        );
    }

    pub async fn load_detail(&self, id: i64) {
        let result = self.service.details(id).await;
        publish_part(&self.detail, &self.errors, id, "movie details", result, |s, v| {
            s.detail = Some(v)
        });
    }

    pub async fn load_credits(&self, id: i64) {
        let result = self.service.credits(id).await;
        publish_part(&self.detail, &self.errors, id, "movie credits", result, |s, v| {
            s.credits = Some(v)
        });
    }

    pub async fn load_images(&self, id: i64) {
        let result = self.service.images(id).await;
        publish_part(&self.detail, &self.errors, id, "movie images", result, |s, v| {
            s.images = Some(v)
        });
    }

    pub async fn load_videos(&self, id: i64) {
        let result = self.service.videos(id).await;
        publish_part(&self.detail, &self.errors, id, "movie videos", result, |s, v| {
            s.videos = v
        });
    }

    pub async fn load_providers(&self, id: i64) {
        let result = self.service.watch_providers(id).await;
        publish_part(&self.detail, &self.errors, id, "watch providers", result, |s, v| {
            s.providers = v
        });
    }

    pub async fn load_certification(&self, id: i64) {
        let result = self.service.certification(id).await;
        publish_part(&self.detail, &self.errors, id, "certification", result, |s, v| {
            s.certification = v
        });
    }

    pub fn load_flags(&self, id: i64) {
        let result = self.service.saved_flags(id);
        publish_part(&self.detail, &self.errors, id, "saved flags", result, |s, v| {
            s.flags = v
        });
    }

    // ------------------------------------------------------------------
    // Favorites / watch list
    // ------------------------------------------------------------------

    /// Flip one flag of `snapshot`; the open detail screen follows along.
    pub fn toggle(&self, snapshot: &CatalogSnapshot, flag: SavedFlag) -> Option<SavedFlags> {
        match self.service.toggle(snapshot, flag) {
            Ok(flags) => {
                self.detail.send_if_modified(|state| {
                    if state.id != Some(snapshot.id) {
                        return false;
                    }
                    state.flags = flags;
                    true
                });
                Some(flags)
            }
            Err(error) => {
                self.errors.report("movie favorites", &error);
                None
            }
        }
    }

    pub fn toggle_favorite(&self, snapshot: &CatalogSnapshot) -> Option<SavedFlags> {
        self.toggle(snapshot, SavedFlag::Favorite)
    }

    pub fn toggle_watchlist(&self, snapshot: &CatalogSnapshot) -> Option<SavedFlags> {
        self.toggle(snapshot, SavedFlag::Watchlist)
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    pub fn error(&self) -> Option<String> {
        self.errors.current()
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.errors.subscribe()
    }
}

/// Movie holder. Loads spawned through it are aborted when it is dropped.
pub struct MovieViewModel {
    state: MovieViewState,
    scope: TaskScope,
}

impl MovieViewModel {
    pub fn new(service: Arc<MovieService>) -> Self {
        Self {
            state: MovieViewState::new(service),
            scope: TaskScope::new(),
        }
    }

    /// Fire-and-forget `load_more`, e.g. from a scroll callback.
    pub fn spawn_load_more(&self, which: MovieFeed) {
        let state = self.state.clone();
        self.scope.spawn(async move {
            state.load_more(which).await;
        });
    }

    pub fn spawn_open(&self, id: i64) {
        let state = self.state.clone();
        self.scope.spawn(async move {
            state.open(id).await;
        });
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }
}

impl Deref for MovieViewModel {
    type Target = MovieViewState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::NO_MORE_ITEMS;
    use crate::application::view_models::test_support::{movie, page_of, services};
    use crate::domain::{MediaKind, Page};
    use crate::error::AppError;
    use crate::integrations::tmdb::MockCatalogApi;
    use mockall::predicate::eq;
    use serde_json::json;

    fn detail(id: i64, title: &str) -> MovieDetail {
        serde_json::from_value(json!({ "id": id, "title": title })).unwrap()
    }

    fn expect_detail_parts(api: &mut MockCatalogApi, id: i64) {
        api.expect_movie_details()
            .with(eq(id), eq("en-US"))
            .returning(|id, _| Ok(detail(id, "Heat")));
        api.expect_credits()
            .with(eq(MediaKind::Movie), eq(id), eq("en-US"))
            .returning(|_, _, _| Ok(Credits::default()));
        api.expect_images()
            .returning(|_, _| Ok(Images::default()));
        api.expect_videos().returning(|_, _, _| Ok(Vec::new()));
        api.expect_watch_providers()
            .with(eq(MediaKind::Movie), eq(id), eq("US"))
            .returning(|_, _, _| Ok(None));
    }

    #[tokio::test]
    async fn test_popular_pages_append_in_order() {
        let mut api = MockCatalogApi::new();
        api.expect_movie_list()
            .with(eq(MovieList::Popular), eq(1), eq("en-US"))
            .times(1)
            .returning(|_, page, _| Ok(page_of(page, &[1, 2], |id| movie(id, "a"))));
        api.expect_movie_list()
            .with(eq(MovieList::Popular), eq(2), eq("en-US"))
            .times(1)
            .returning(|_, page, _| Ok(page_of(page, &[3], |id| movie(id, "b"))));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        assert_eq!(movies.load_more(MovieFeed::Popular).await, LoadOutcome::Appended(2));
        assert_eq!(movies.load_more(MovieFeed::Popular).await, LoadOutcome::Appended(1));

        let ids: Vec<i64> = movies.feed(MovieFeed::Popular).items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(movies.feed(MovieFeed::Popular).next_page(), 3);
        assert!(movies.feed(MovieFeed::TopRated).is_empty());
        assert!(movies.error().is_none());
    }

    #[tokio::test]
    async fn test_empty_page_reports_no_more_items() {
        let mut api = MockCatalogApi::new();
        api.expect_movie_list()
            .returning(|_, page, _| Ok(Page::empty(page)));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        assert_eq!(movies.load_more(MovieFeed::Upcoming).await, LoadOutcome::Exhausted);
        assert_eq!(movies.error().as_deref(), Some(NO_MORE_ITEMS));
        assert_eq!(movies.feed(MovieFeed::Upcoming).next_page(), 1);

        movies.clear_error();
        assert!(movies.error().is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_loaded_items() {
        let mut api = MockCatalogApi::new();
        let mut calls = 0;
        api.expect_movie_list().times(2).returning(move |_, page, _| {
            calls += 1;
            if calls == 1 {
                Ok(page_of(page, &[1], |id| movie(id, "a")))
            } else {
                Err(AppError::Api {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                })
            }
        });
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.load_more(MovieFeed::NowPlaying).await;
        assert_eq!(movies.load_more(MovieFeed::NowPlaying).await, LoadOutcome::Failed);

        assert_eq!(movies.feed(MovieFeed::NowPlaying).len(), 1);
        assert_eq!(movies.feed(MovieFeed::NowPlaying).next_page(), 2);
        assert!(movies.error().unwrap().contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_discover_uses_filter_and_resets() {
        let mut api = MockCatalogApi::new();
        api.expect_discover_movies()
            .withf(|filter, page, _| filter.genre_ids == vec![28] && *page == 1)
            .times(2)
            .returning(|_, page, _| Ok(page_of(page, &[10], |id| movie(id, "action"))));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.set_discover_filter(DiscoverFilter::default().with_genre(28));
        movies.load_more(MovieFeed::Discover).await;
        assert_eq!(movies.feed(MovieFeed::Discover).next_page(), 2);

        movies.set_discover_filter(DiscoverFilter::default().with_genre(28));
        assert!(movies.feed(MovieFeed::Discover).is_empty());
        movies.load_more(MovieFeed::Discover).await;
        assert_eq!(movies.feed(MovieFeed::Discover).len(), 1);
    }

    #[tokio::test]
    async fn test_search_new_query_starts_over() {
        let mut api = MockCatalogApi::new();
        api.expect_search_movies()
            .with(eq("alien"), eq(1), eq("en-US"))
            .returning(|_, page, _| Ok(page_of(page, &[1, 2], |id| movie(id, "Alien"))));
        api.expect_search_movies()
            .with(eq("heat"), eq(1), eq("en-US"))
            .returning(|_, page, _| Ok(page_of(page, &[3], |id| movie(id, "Heat"))));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.search("alien").await;
        movies.search("heat").await;

        let found = movies.search_feed().feed().items();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Heat");
    }

    #[tokio::test]
    async fn test_open_loads_every_part() {
        let mut api = MockCatalogApi::new();
        expect_detail_parts(&mut api, 949);
        api.expect_certification()
            .with(eq(MediaKind::Movie), eq(949), eq("US"))
            .returning(|_, _, _| Ok(Some("R".to_string())));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.open(949).await;

        let state = movies.detail();
        assert_eq!(state.id, Some(949));
        assert_eq!(state.detail.unwrap().title, "Heat");
        assert!(state.credits.is_some());
        assert!(state.images.is_some());
        assert_eq!(state.certification.as_deref(), Some("R"));
        assert_eq!(state.flags, SavedFlags::default());
        assert!(movies.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_part_keeps_the_rest() {
        let mut api = MockCatalogApi::new();
        expect_detail_parts(&mut api, 949);
        api.expect_certification()
            .returning(|_, _, _| Err(AppError::Other("release dates unavailable".to_string())));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.open(949).await;

        let state = movies.detail();
        assert!(state.detail.is_some());
        assert!(state.certification.is_none());
        assert!(movies.error().unwrap().contains("release dates unavailable"));
    }

    #[tokio::test]
    async fn test_toggle_updates_open_detail() {
        let mut api = MockCatalogApi::new();
        expect_detail_parts(&mut api, 949);
        api.expect_certification().returning(|_, _, _| Ok(None));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());

        movies.open(949).await;
        let snapshot = CatalogSnapshot::from(movies.detail().detail.as_ref().unwrap());

        let flags = movies.toggle_favorite(&snapshot).unwrap();
        assert!(flags.is_favorite);
        assert!(movies.detail().flags.is_favorite);
        assert_eq!(fx.movies.favorites().unwrap()[0].title, "Heat");

        movies.toggle_favorite(&snapshot).unwrap();
        assert!(fx.movies.favorites().unwrap().is_empty());
        assert!(!movies.detail().flags.is_favorite);
    }

    #[tokio::test]
    async fn test_genres_published() {
        let mut api = MockCatalogApi::new();
        api.expect_genres()
            .with(eq(MediaKind::Movie), eq("en-US"))
            .returning(|_, _| {
                Ok(vec![Genre {
                    id: 28,
                    name: "Action".to_string(),
                }])
            });
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());
        let mut updates = movies.subscribe_genres();

        movies.load_genres().await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update()[0].name, "Action");
    }

    #[tokio::test]
    async fn test_spawned_load_runs_in_background() {
        let mut api = MockCatalogApi::new();
        api.expect_movie_list()
            .returning(|_, page, _| Ok(page_of(page, &[1], |id| movie(id, "a"))));
        let fx = services(api);
        let movies = MovieViewModel::new(fx.movies.clone());
        let mut updates = movies.feed(MovieFeed::TopRated).subscribe();

        movies.spawn_load_more(MovieFeed::TopRated);
        updates.changed().await.unwrap();

        assert_eq!(updates.borrow().items.len(), 1);
    }
}
