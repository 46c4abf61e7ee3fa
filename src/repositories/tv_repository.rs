// src/repositories/tv_repository.rs
//
// Show data access: remote catalog + saved shows.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LocalePreference;
use crate::domain::{
    Credits, DiscoverFilter, Genre, Images, LocalEntity, MediaKind, Page, RegionProviders,
    SeasonDetail, TvDetail, TvList, TvSummary, Video,
};
use crate::error::AppResult;
use crate::integrations::CatalogApi;
use crate::repositories::LocalEntityRepository;

#[async_trait]
pub trait TvRepository: Send + Sync {
    async fn list(&self, list: TvList, page: u32) -> AppResult<Page<TvSummary>>;
    async fn discover(&self, filter: &DiscoverFilter, page: u32) -> AppResult<Page<TvSummary>>;
    async fn search(&self, query: &str, page: u32) -> AppResult<Page<TvSummary>>;
    async fn details(&self, id: i64) -> AppResult<TvDetail>;
    async fn season(&self, id: i64, season_number: i64) -> AppResult<SeasonDetail>;
    async fn credits(&self, id: i64) -> AppResult<Credits>;
    async fn images(&self, id: i64) -> AppResult<Images>;
    async fn videos(&self, id: i64) -> AppResult<Vec<Video>>;
    async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>>;
    async fn content_rating(&self, id: i64) -> AppResult<Option<String>>;
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    fn saved(&self, id: i64) -> AppResult<Option<LocalEntity>>;
    fn save(&self, entity: &LocalEntity) -> AppResult<()>;
    fn remove(&self, id: i64) -> AppResult<()>;
    fn favorites(&self) -> AppResult<Vec<LocalEntity>>;
    fn watchlist(&self) -> AppResult<Vec<LocalEntity>>;
}

pub struct CatalogTvRepository {
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn LocalEntityRepository>,
    locale: Arc<LocalePreference>,
}

impl CatalogTvRepository {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn LocalEntityRepository>,
        locale: Arc<LocalePreference>,
    ) -> Self {
        Self { api, store, locale }
    }
}

#[async_trait]
impl TvRepository for CatalogTvRepository {
    async fn list(&self, list: TvList, page: u32) -> AppResult<Page<TvSummary>> {
        self.api.tv_list(list, page, &self.locale.language()).await
    }

    async fn discover(&self, filter: &DiscoverFilter, page: u32) -> AppResult<Page<TvSummary>> {
        self.api
            .discover_tv(filter, page, &self.locale.language())
            .await
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Page<TvSummary>> {
        self.api.search_tv(query, page, &self.locale.language()).await
    }

    async fn details(&self, id: i64) -> AppResult<TvDetail> {
        self.api.tv_details(id, &self.locale.language()).await
    }

    async fn season(&self, id: i64, season_number: i64) -> AppResult<SeasonDetail> {
        self.api
            .tv_season(id, season_number, &self.locale.language())
            .await
    }

    async fn credits(&self, id: i64) -> AppResult<Credits> {
        self.api
            .credits(MediaKind::Tv, id, &self.locale.language())
            .await
    }

    async fn images(&self, id: i64) -> AppResult<Images> {
        self.api.images(MediaKind::Tv, id).await
    }

    async fn videos(&self, id: i64) -> AppResult<Vec<Video>> {
        self.api
            .videos(MediaKind::Tv, id, &self.locale.language())
            .await
    }

    async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>> {
        self.api
            .watch_providers(MediaKind::Tv, id, &self.locale.region())
            .await
    }

    async fn content_rating(&self, id: i64) -> AppResult<Option<String>> {
        self.api
            .certification(MediaKind::Tv, id, &self.locale.region())
            .await
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.api.genres(MediaKind::Tv, &self.locale.language()).await
    }

    fn saved(&self, id: i64) -> AppResult<Option<LocalEntity>> {
        self.store.get_by_id(MediaKind::Tv, id)
    }

    fn save(&self, entity: &LocalEntity) -> AppResult<()> {
        self.store.save(entity)
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        self.store.delete(MediaKind::Tv, id)
    }

    fn favorites(&self) -> AppResult<Vec<LocalEntity>> {
        self.store.list_favorites(MediaKind::Tv)
    }

    fn watchlist(&self) -> AppResult<Vec<LocalEntity>> {
        self.store.list_watchlist(MediaKind::Tv)
    }
}
