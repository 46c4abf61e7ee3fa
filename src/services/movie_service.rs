// src/services/movie_service.rs
//
// Movie use cases. Forwards to MovieRepository; saved-entity writes are
// validated first.

use std::sync::Arc;

use crate::domain::{
    validate_local_entity, CatalogSnapshot, Credits, DiscoverFilter, Genre, Images, LocalEntity,
    MediaKind, MovieDetail, MovieList, MovieSummary, Page, RegionProviders, SavedFlag, SavedFlags,
    Video,
};
use crate::error::{AppError, AppResult};
use crate::repositories::MovieRepository;
use crate::services::ensure_kind;

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }

    pub async fn list(&self, list: MovieList, page: u32) -> AppResult<Page<MovieSummary>> {
        log::debug!("Loading {:?} movies, page {}", list, page);
        self.movie_repo.list(list, page).await
    }

    pub async fn discover(
        &self,
        filter: &DiscoverFilter,
        page: u32,
    ) -> AppResult<Page<MovieSummary>> {
        log::debug!("Discovering movies {:?}, page {}", filter, page);
        self.movie_repo.discover(filter, page).await
    }

    pub async fn search(&self, query: &str, page: u32) -> AppResult<Page<MovieSummary>> {
        log::debug!("Searching movies for {:?}, page {}", query, page);
        self.movie_repo.search(query, page).await
    }

    pub async fn details(&self, id: i64) -> AppResult<MovieDetail> {
        self.movie_repo.details(id).await
    }

    pub async fn credits(&self, id: i64) -> AppResult<Credits> {
        self.movie_repo.credits(id).await
    }

    pub async fn images(&self, id: i64) -> AppResult<Images> {
        self.movie_repo.images(id).await
    }

    pub async fn videos(&self, id: i64) -> AppResult<Vec<Video>> {
        self.movie_repo.videos(id).await
    }

    pub async fn watch_providers(&self, id: i64) -> AppResult<Option<RegionProviders>> {
        self.movie_repo.watch_providers(id).await
    }

    pub async fn certification(&self, id: i64) -> AppResult<Option<String>> {
        self.movie_repo.certification(id).await
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.movie_repo.genres().await
    }

    pub fn saved_flags(&self, id: i64) -> AppResult<SavedFlags> {
        Ok(self
            .movie_repo
            .saved(id)?
            .map(|entity| entity.flags())
            .unwrap_or_default())
    }

    /// Flip one flag and rewrite the whole record; drop it once both flags are off.
    pub fn toggle(&self, snapshot: &CatalogSnapshot, flag: SavedFlag) -> AppResult<SavedFlags> {
        ensure_kind(snapshot, MediaKind::Movie)?;

        let current = self
            .movie_repo
            .saved(snapshot.id)?
            .unwrap_or_else(|| LocalEntity::from_snapshot(snapshot));
        let updated = current.toggled(flag, snapshot.title.clone(), snapshot.poster_path.clone());

        if updated.is_unflagged() {
            log::debug!("Removing movie {} from local store", updated.id);
            self.movie_repo.remove(updated.id)?;
        } else {
            validate_local_entity(&updated).map_err(AppError::Domain)?;
            log::debug!(
                "Saving movie {} (favorite={}, watchlist={})",
                updated.id,
                updated.is_favorite,
                updated.is_in_watchlist
            );
            self.movie_repo.save(&updated)?;
        }

        Ok(updated.flags())
    }

    /// Turn one flag off, reading the stored record rather than trusting the
    /// caller's copy. Never creates a record.
    pub fn clear_flag(&self, snapshot: &CatalogSnapshot, flag: SavedFlag) -> AppResult<SavedFlags> {
        ensure_kind(snapshot, MediaKind::Movie)?;

        let flags = self.saved_flags(snapshot.id)?;
        if !flags.has(flag) {
            log::debug!("Movie {} already lacks {:?}", snapshot.id, flag);
            return Ok(flags);
        }
        self.toggle(snapshot, flag)
    }

    pub fn favorites(&self) -> AppResult<Vec<LocalEntity>> {
        self.movie_repo.favorites()
    }

    pub fn watchlist(&self) -> AppResult<Vec<LocalEntity>> {
        self.movie_repo.watchlist()
    }
}
