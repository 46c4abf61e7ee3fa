// src/application/view_models/tv.rs
//
// Show holder. Same surface as the movie holder plus per-season detail.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;

use super::{
    publish_part, DetailState, ErrorSlot, LoadOutcome, PagedFeed, SearchFeed, SearchOutcome,
    TaskScope,
};
use crate::domain::{
    CatalogSnapshot, Credits, DiscoverFilter, Genre, Images, RegionProviders, SavedFlag,
    SavedFlags, SeasonDetail, TvDetail, TvList, TvSummary, Video,
};
use crate::services::TvService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvFeed {
    Discover,
    Popular,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl TvFeed {
    fn list(self) -> Option<TvList> {
        match self {
            TvFeed::Discover => None,
            TvFeed::Popular => Some(TvList::Popular),
            TvFeed::TopRated => Some(TvList::TopRated),
            TvFeed::AiringToday => Some(TvList::AiringToday),
            TvFeed::OnTheAir => Some(TvList::OnTheAir),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TvDetailState {
    pub id: Option<i64>,
    pub detail: Option<TvDetail>,
    pub credits: Option<Credits>,
    pub images: Option<Images>,
    pub videos: Vec<Video>,
    pub providers: Option<RegionProviders>,
    pub content_rating: Option<String>,
    /// Seasons opened so far, by season number
    pub seasons: BTreeMap<i64, SeasonDetail>,
    pub flags: SavedFlags,
}

impl DetailState for TvDetailState {
    fn current_id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Clone)]
pub struct TvViewState {
    service: Arc<TvService>,
    errors: ErrorSlot,
    discover: PagedFeed<TvSummary>,
    popular: PagedFeed<TvSummary>,
    top_rated: PagedFeed<TvSummary>,
    airing_today: PagedFeed<TvSummary>,
    on_the_air: PagedFeed<TvSummary>,
    search: SearchFeed<TvSummary>,
    filter: Arc<Mutex<DiscoverFilter>>,
    genres: Arc<watch::Sender<Vec<Genre>>>,
    detail: Arc<watch::Sender<TvDetailState>>,
}

impl TvViewState {
    pub fn new(service: Arc<TvService>) -> Self {
        let errors = ErrorSlot::new();
        let (genres, _) = watch::channel(Vec::new());
        let (detail, _) = watch::channel(TvDetailState::default());

        Self {
            service,
            discover: PagedFeed::new("discover shows", errors.clone()),
            popular: PagedFeed::new("popular shows", errors.clone()),
            top_rated: PagedFeed::new("top rated shows", errors.clone()),
            airing_today: PagedFeed::new("shows airing today", errors.clone()),
            on_the_air: PagedFeed::new("shows on the air", errors.clone()),
            search: SearchFeed::new("show search", errors.clone()),
            filter: Arc::new(Mutex::new(DiscoverFilter::default())),
            genres: Arc::new(genres),
            detail: Arc::new(detail),
            errors,
        }
    }

    pub fn feed(&self, which: TvFeed) -> &PagedFeed<TvSummary> {
        match which {
            TvFeed::Discover => &self.discover,
            TvFeed::Popular => &self.popular,
            TvFeed::TopRated => &self.top_rated,
            TvFeed::AiringToday => &self.airing_today,
            TvFeed::OnTheAir => &self.on_the_air,
        }
    }

    pub async fn load_more(&self, which: TvFeed) -> LoadOutcome {
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
            Err(error) => self.errors.report("show genres", &error),
        }
    }

    pub fn genres(&self) -> Vec<Genre> {
        self.genres.borrow().clone()
    }

    pub fn subscribe_genres(&self) -> watch::Receiver<Vec<Genre>> {
        self.genres.subscribe()
    }

    pub fn search_feed(&self) -> &SearchFeed<TvSummary> {
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

    pub fn detail(&self) -> TvDetailState {
        self.detail.borrow().clone()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<TvDetailState> {
        self.detail.subscribe()
    }

    pub async fn open(&self, id: i64) {
        self.detail.send_replace(TvDetailState {
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
            self.load_content_rating(id),
        );
    }

    pub async fn load_detail(&self, id: i64) {
        let result = self.service.details(id).await;
        publish_part(&self.detail, &self.errors, id, "show details", result, |s, v| {
            s.detail = Some(v)
        });
    }

    /// Episodes of one season of the open show.
    pub async fn load_season(&self, id: i64, season_number: i64) {
        let result = self.service.season(id, season_number).await;
        publish_part(&self.detail, &self.errors, id, "season", result, |s, v| {
            s.seasons.insert(season_number, v);
        });
    }

    pub async fn load_credits(&self, id: i64) {
        let result = self.service.credits(id).await;
        publish_part(&self.detail, &self.errors, id, "show credits", result, |s, v| {
            s.credits = Some(v)
        });
    }

    pub async fn load_images(&self, id: i64) {
        let result = self.service.images(id).await;
        publish_part(&self.detail, &self.errors, id, "show images", result, |s, v| {
            s.images = Some(v)
        });
    }

    pub async fn load_videos(&self, id: i64) {
        let result = self.service.videos(id).await;
        publish_part(&self.detail, &self.errors, id, "show videos", result, |s, v| {
            s.videos = v
        });
    }

    pub async fn load_providers(&self, id: i64) {
        let result = self.service.watch_providers(id).await;
        publish_part(&self.detail, &self.errors, id, "watch providers", result, |s, v| {
            s.providers = v
        });
    }

    pub async fn load_content_rating(&self, id: i64) {
        let result = self.service.content_rating(id).await;
        publish_part(&self.detail, &self.errors, id, "content rating", result, |s, v| {
            s.content_rating = v
        });
    }

    pub fn load_flags(&self, id: i64) {
        let result = self.service.saved_flags(id);
        publish_part(&self.detail, &self.errors, id, "saved flags", result, |s, v| {
            s.flags = v
        });
    }

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
                self.errors.report("show favorites", &error);
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

pub struct TvViewModel {
    state: TvViewState,
    scope: TaskScope,
}

impl TvViewModel {
    pub fn new(service: Arc<TvService>) -> Self {
        Self {
            state: TvViewState::new(service),
            scope: TaskScope::new(),
        }
    }

    pub fn spawn_load_more(&self, which: TvFeed) {
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

impl Deref for TvViewModel {
    type Target = TvViewState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::view_models::test_support::{page_of, services, show};
    use crate::application::view_models::SearchOutcome;
    use crate::domain::MediaKind;
    use crate::integrations::tmdb::MockCatalogApi;
    use mockall::predicate::eq;
    use serde_json::json;

    fn detail(id: i64, name: &str) -> TvDetail {
        serde_json::from_value(json!({ "id": id, "name": name })).unwrap()
    }

    fn season(number: i64) -> SeasonDetail {
        serde_json::from_value(json!({
            "id": 3624 + number,
            "name": format!("Season {}", number),
            "season_number": number,
            "episodes": []
        }))
        .unwrap()
    }

    fn expect_detail_parts(api: &mut MockCatalogApi) {
        api.expect_tv_details()
            .returning(|id, _| Ok(detail(id, "Game of Thrones")));
        api.expect_credits()
            .with(eq(MediaKind::Tv), eq(1399), eq("en-US"))
            .returning(|_, _, _| Ok(Credits::default()));
        api.expect_images().returning(|_, _| Ok(Images::default()));
        api.expect_videos().returning(|_, _, _| Ok(Vec::new()));
        api.expect_watch_providers().returning(|_, _, _| Ok(None));
        api.expect_certification()
            .with(eq(MediaKind::Tv), eq(1399), eq("US"))
            .returning(|_, _, _| Ok(Some("TV-MA".to_string())));
    }

    #[tokio::test]
    async fn test_airing_today_feed() {
        let mut api = MockCatalogApi::new();
        api.expect_tv_list()
            .with(eq(TvList::AiringToday), eq(1), eq("en-US"))
            .times(1)
            .returning(|_, page, _| Ok(page_of(page, &[1, 2, 3], |id| show(id, "s"))));
        let fx = services(api);
        let shows = TvViewModel::new(fx.shows.clone());

        assert_eq!(shows.load_more(TvFeed::AiringToday).await, LoadOutcome::Appended(3));
        assert!(shows.feed(TvFeed::AiringToday).should_load_more(2));
        assert!(!shows.feed(TvFeed::AiringToday).should_load_more(0));
    }

    #[tokio::test]
    async fn test_open_then_load_season() {
        let mut api = MockCatalogApi::new();
        expect_detail_parts(&mut api);
        api.expect_tv_season()
            .with(eq(1399), eq(1), eq("en-US"))
            .returning(|_, number, _| Ok(season(number)));
        let fx = services(api);
        let shows = TvViewModel::new(fx.shows.clone());

        shows.open(1399).await;
        shows.load_season(1399, 1).await;

        let state = shows.detail();
        assert_eq!(state.detail.unwrap().name, "Game of Thrones");
        assert_eq!(state.content_rating.as_deref(), Some("TV-MA"));
        assert_eq!(state.seasons[&1].name, "Season 1");
    }

    #[tokio::test]
    async fn test_season_for_closed_show_is_dropped() {
        let mut api = MockCatalogApi::new();
        expect_detail_parts(&mut api);
        api.expect_tv_season()
            .returning(|_, number, _| Ok(season(number)));
        let fx = services(api);
        let shows = TvViewModel::new(fx.shows.clone());

        shows.open(1399).await;
        shows.load_season(82856, 1).await;

        assert!(shows.detail().seasons.is_empty());
    }

    #[tokio::test]
    async fn test_watchlist_toggle() {
        let fx = services(MockCatalogApi::new());
        let shows = TvViewModel::new(fx.shows.clone());
        let snapshot = CatalogSnapshot::from(&show(1399, "Game of Thrones"));

        let flags = shows.toggle_watchlist(&snapshot).unwrap();
        assert!(flags.is_in_watchlist && !flags.is_favorite);
        assert_eq!(fx.shows.watchlist().unwrap().len(), 1);
        assert!(fx.shows.favorites().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_clears_without_fetch() {
        let mut api = MockCatalogApi::new();
        api.expect_search_tv()
            .times(1)
            .returning(|_, page, _| Ok(page_of(page, &[1], |id| show(id, "Dark"))));
        let fx = services(api);
        let shows = TvViewModel::new(fx.shows.clone());

        shows.search("dark").await;
        assert_eq!(shows.search_feed().feed().len(), 1);

        assert_eq!(shows.search("").await, SearchOutcome::Cleared);
        assert!(shows.search_feed().feed().is_empty());
    }
}
