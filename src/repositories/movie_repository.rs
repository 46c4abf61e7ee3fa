// src/repositories/movie_repository.rs
//
// Movie data access: remote catalog + saved movies.
// Forwards only; the current language/region is injected per call.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LocalePreference;
use crate::domain::{
    Credits, DiscoverFilter, Genre, Images, LocalEntity, MediaKind, MovieDetail, MovieList,
    MovieSummary, Page, RegionProviders, Video,
};
use crate::error::AppResult;
use crate::integrations::CatalogApi;
use crate::repositories::LocalEntityRepository;

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list(&self, list: MovieList, page: u32) -> AppResult<Page<MovieSummary>>;
    async fn discover(&self, filter: &DiscoverFilter, page: u32) -> AppResult<Page<MovieSummary>>;
    async fn search(&self, query: &str, page: u32) -> AppResult<Page<MovieSummary>>;
    async fn details(&self, id: i64) -> AppResult<MovieDetail>;
    async fn credits(&self, id: i64) -> AppResult<Credits>;
    async fn images(&self, id: i64) -> AppResult<Images>;
    async fn videos(&self, id: i64) -> AppResult<Vec<Video>>;
    async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>>;
    async fn certification(&self, id: i64) -> AppResult<Option<String>>;
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    fn saved(&self, id: i64) -> AppResult<Option<LocalEntity>>;
    fn save(&self, entity: &LocalEntity) -> AppResult<()>;
    fn remove(&self, id: i64) -> AppResult<()>;
    fn favorites(&self) -> AppResult<Vec<LocalEntity>>;
    fn watchlist(&self) -> AppResult<Vec<LocalEntity>>;
}

pub struct CatalogMovieRepository {
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn LocalEntityRepository>,
    locale: Arc<LocalePreference>,
}

impl CatalogMovieRepository {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn LocalEntityRepository>,
        locale: Arc<LocalePreference>,
    ) -> Self {
        Self { api, store, locale }
    }
}

#[async_trait]
impl MovieRepository for CatalogMovieRepository {
    async fn list(&self, list: MovieList, page: u32) -> AppResult<Page<MovieSummary>> {
        self.api.movie_list(list, page, &self.locale.language()).await
    }

    async fn discover(&self, filter: &DiscoverFilter, page: u32) -> AppResult<Page<MovieSummary>> {
        self.api
            .discover_movies(filter, page, &self.locale.language())
            .await
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Page<MovieSummary>> {
        self.api
            .search_movies(query, page, &self.locale.language())
            .await
    }

    async fn details(&self, id: i64) -> AppResult<MovieDetail> {
        self.api.movie_details(id, &self.locale.language()).await
    }

    async fn credits(&self, id: i64) -> AppResult<Credits> {
        self.api
            .credits(MediaKind::Movie, id, &self.locale.language())
            .await
    }

    async fn images(&self, id: i64) -> AppResult<Images> {
        self.api.images(MediaKind::Movie, id).await
    }

    async fn videos(&self, id: i64) -> AppResult<Vec<Video>> {
        self.api
            .videos(MediaKind::Movie, id, &self.locale.language())
            .await
    }

    async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>> {
        self.api
            .watch_providers(MediaKind::Movie, id, &self.locale.region())
            .await
    }

    async fn certification(&self, id: i64) -> AppResult<Option<String>> {
        self.api
            .certification(MediaKind::Movie, id, &self.locale.region())
            .await
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.api
            .genres(MediaKind::Movie, &self.locale.language())
            .await
    }

    fn saved(&self, id: i64) -> AppResult<Option<LocalEntity>> {
        self.store.get_by_id(MediaKind::Movie, id)
    }

    fn save(&self, entity: &LocalEntity) -> AppResult<()> {
        self.store.save(entity)
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        self.store.delete(MediaKind::Movie, id)
    }

    fn favorites(&self) -> AppResult<Vec<LocalEntity>> {
        self.store.list_favorites(MediaKind::Movie)
    }

    fn watchlist(&self) -> AppResult<Vec<LocalEntity>> {
        self.store.list_watchlist(MediaKind::Movie)
    }
}
