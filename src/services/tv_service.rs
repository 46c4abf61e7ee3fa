// src/services/tv_service.rs

use std::sync::Arc;

use crate::domain::{
    validate_local_entity, CatalogSnapshot, Credits, DiscoverFilter, Genre, Images, LocalEntity,
    MediaKind, Page, RegionProviders, SavedFlag, SavedFlags, SeasonDetail, TvDetail, TvList,
    TvSummary, Video,
};
use crate::error::{AppError, AppResult};
use crate::repositories::TvRepository;
use crate::services::ensure_kind;

pub struct TvService {
    tv_repo: Arc<dyn TvRepository>,
}

impl TvService {
    pub fn new(tv_repo: Arc<dyn TvRepository>) -> Self {
        Self { tv_repo }
    }

    pub async fn list(&self, list: TvList, page: u32) -> AppResult<Page<TvSummary>> {
        log::debug!("Loading {:?} shows, page {}", list, page);
        self.tv_repo.list(list, page).await
    }

    pub async fn discover(&self, filter: &DiscoverFilter, page: u32) -> AppResult<Page<TvSummary>> {
        log::debug!("Discovering shows {:?}, page {}", filter, page);
        self.tv_repo.discover(filter, page).await
    }

    pub async fn search(&self, query: &str, page: u32) -> AppResult<Page<TvSummary>> {
        log::debug!("Searching shows for {:?}, page {}", query, page);
        self.tv_repo.search(query, page).await
    }

    pub async fn details(&self, id: i64) -> AppResult<TvDetail> {
        self.tv_repo.details(id).await
    }

    pub async fn season(&self, id: i64, season_number: i64) -> AppResult<SeasonDetail> {
        self.tv_repo.season(id, season_number).await
    }

    pub async fn credits(&self, id: i64) -> AppResult<Credits> {
        self.tv_repo.credits(id).await
    }

    pub async fn images(&self, id: i64) -> AppResult<Images> {
        self.tv_repo.images(id).await
    }

    pub async fn videos(&self, id: i64) -> AppResult<Vec<Video>> {
        self.tv_repo.videos(id).await
    }

    pub async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>> {
        self.tv_repo.watch_providers(id).await
    }

    pub async fn content_rating(&self, id: i64) -> AppResult<Option<String>> {
        self.tv_repo.content_rating(id).await
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.tv_repo.genres().await
    }

    pub fn saved_flags(&self, id: i64) -> AppResult<SavedFlags> {
        Ok(self
            .tv_repo
            .saved(id)?
            .map(|entity| entity.flags())
            .unwrap_or_default())
    }

    pub fn toggle(&self, snapshot: &CatalogSnapshot, flag: SavedFlag) -> AppResult<SavedFlags> {
        ensure_kind(snapshot, MediaKind::Tv)?;

        let current = self
            .tv_repo
            .saved(snapshot.id)?
            .unwrap_or_else(|| LocalEntity::from_snapshot(snapshot));
        let updated = current.toggled(flag, snapshot.title.clone(), snapshot.poster_path.clone());

        if updated.is_unflagged() {
            log::debug!("Removing show {} from local store", updated.id);
            self.tv_repo.remove(updated.id)?;
        } else {
            validate_local_entity(&updated).map_err(AppError::Domain)?;
            log::debug!(
                "Saving show {} (favorite={}, watchlist={})",
                updated.id,
                updated.is_favorite,
                updated.is_in_watchlist
            );
            self.tv_repo.save(&updated)?;
        }

        Ok(updated.flags())
    }

    /// Turn one flag off, reading the stored record rather than trusting the
    /// caller's copy. Never creates a record.
    pub fn clear_flag(&self, snapshot: &CatalogSnapshot, flag: SavedFlag) -> AppResult<SavedFlags> {
        ensure_kind(snapshot, MediaKind::Tv)?;

        let flags = self.saved_flags(snapshot.id)?;
        if !flags.has(flag) {
            log::debug!("Show {} already lacks {:?}", snapshot.id, flag);
            return Ok(flags);
        }
        self.toggle(snapshot, flag)
    }

    pub fn favorites(&self) -> AppResult<Vec<LocalEntity>> {
        self.tv_repo.favorites()
    }

    pub fn watchlist(&self) -> AppResult<Vec<LocalEntity>> {
        self.tv_repo.watchlist()
    }
}
