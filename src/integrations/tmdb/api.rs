// src/integrations/tmdb/api.rs
//
// Remote catalog port. One method per TMDB GET endpoint the app uses.
// Implementations map request → response and nothing else.

use async_trait::async_trait;

use crate::domain::{
    Credits, DiscoverFilter, Genre, Images, MediaKind, MovieDetail, MovieList, MovieSummary, Page,
    PersonCredits, PersonDetail, PersonSummary, ProfileImages, RegionProviders, SeasonDetail,
    TvDetail, TvList, TvSummary, Video,
};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // ------------------------------------------------------------------
    // Movies
    // ------------------------------------------------------------------

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
        language: &str,
    ) -> AppResult<Page<MovieSummary>>;

    async fn discover_movies(
        &self,
        filter: &DiscoverFilter,
        page: u32,
        language: &str,
    ) -> AppResult<Page<MovieSummary>>;

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> AppResult<Page<MovieSummary>>;

    async fn movie_details(&self, id: i64, language: &str) -> AppResult<MovieDetail>;

    // ------------------------------------------------------------------
    // TV
    // ------------------------------------------------------------------

    async fn tv_list(&self, list: TvList, page: u32, language: &str) -> AppResult<Page<TvSummary>>;

    async fn discover_tv(
        &self,
        filter: &DiscoverFilter,
        page: u32,
        language: &str,
    ) -> AppResult<Page<TvSummary>>;

    async fn search_tv(&self, query: &str, page: u32, language: &str) -> AppResult<Page<TvSummary>>;

    async fn tv_details(&self, id: i64, language: &str) -> AppResult<TvDetail>;

    async fn tv_season(&self, id: i64, season_number: i64, language: &str)
        -> AppResult<SeasonDetail>;

    // ------------------------------------------------------------------
    // People
    // ------------------------------------------------------------------

    async fn popular_people(&self, page: u32, language: &str) -> AppResult<Page<PersonSummary>>;

    async fn search_people(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> AppResult<Page<PersonSummary>>;

    async fn person_details(&self, id: i64, language: &str) -> AppResult<PersonDetail>;

    async fn person_credits(&self, id: i64, language: &str) -> AppResult<PersonCredits>;

    async fn person_images(&self, id: i64) -> AppResult<ProfileImages>;

    // ------------------------------------------------------------------
    // Shared by movies and shows
    // ------------------------------------------------------------------

    async fn credits(&self, kind: MediaKind, id: i64, language: &str) -> AppResult<Credits>;

    async fn images(&self, kind: MediaKind, id: i64) -> AppResult<Images>;

    async fn videos(&self, kind: MediaKind, id: i64, language: &str) -> AppResult<Vec<Video>>;

    /// Offers for one region; `None` when the title has none there.
    async fn watch_providers(
        &self,
        kind: MediaKind,
        id: i64,
        region: &str,
    ) -> AppResult<Option<RegionProviders>>;

    /// Age rating for one region (release dates for movies, content ratings for shows).
    async fn certification(&self, kind: MediaKind, id: i64, region: &str)
        -> AppResult<Option<String>>;

    async fn genres(&self, kind: MediaKind, language: &str) -> AppResult<Vec<Genre>>;
}
