// src/integrations/tmdb/client.rs
//
// TMDB v3 REST client
//
// ARCHITECTURE:
// - One GET per CatalogApi method, api_key passed as query parameter
// - Maps HTTP status and TMDB error bodies → AppError
// - Returns domain catalog records; never touches the local store
// - No retry, no backoff, no rate limiting

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::api::CatalogApi;
use crate::config::{AppConfig, DEFAULT_BASE_URL, ENV_API_KEY};
use crate::domain::{
    Credits, DiscoverFilter, Genre, Images, MediaKind, MovieDetail, MovieList, MovieSummary, Page,
    PersonCredits, PersonDetail, PersonSummary, ProfileImages, RegionProviders, SeasonDetail,
    TvDetail, TvList, TvSummary, Video,
};
use crate::domain::catalog::WatchProviderResults;
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Query parameters of a single request, `api_key` excluded.
type Params = Vec<(String, String)>;

// ============================================================================
// WIRE-ONLY ENVELOPES
// ============================================================================

/// Error body TMDB sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDatesResponse {
    #[serde(default)]
    results: Vec<CountryReleaseDates>,
}

#[derive(Debug, Deserialize)]
struct CountryReleaseDates {
    iso_3166_1: String,
    #[serde(default)]
    release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDate {
    #[serde(default)]
    certification: String,
    #[serde(rename = "type", default)]
    release_type: i64,
}

#[derive(Debug, Deserialize)]
struct ContentRatingsResponse {
    #[serde(default)]
    results: Vec<ContentRating>,
}

#[derive(Debug, Deserialize)]
struct ContentRating {
    iso_3166_1: String,
    #[serde(default)]
    rating: String,
}

/// TMDB release type for a theatrical release
const THEATRICAL_RELEASE: i64 = 3;

// ============================================================================
// CLIENT
// ============================================================================

pub struct TmdbClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl TmdbClient {
    /// Create a client against the public TMDB endpoint.
    ///
    /// A blank key is accepted so the local store stays usable offline;
    /// every request made without one fails with `AppError::Config`.
    pub fn new(api_key: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            log::warn!("No TMDB API key configured, catalog requests will fail");
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.trim().to_string(),
            http_client,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(config.api_key.clone())?.with_base_url(config.base_url.clone()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/3{}", self.base_url, path)
    }

    // ========================================================================
    // INTERNAL: request execution
    // ========================================================================

    async fn get<T>(&self, path: &str, params: Params) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        if self.api_key.is_empty() {
            return Err(AppError::Config(format!(
                "TMDB API key is missing; set {} or add api_key to the config file",
                ENV_API_KEY
            )));
        }

        log::debug!("TMDB GET {} {:?}", path, params);

        let response = self
            .http_client
            .get(self.endpoint(path))
            .header(header::ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str())])
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        decode_response(status, &body)
    }

    async fn get_page<T>(&self, path: &str, page: u32, mut params: Params) -> AppResult<Page<T>>
    where
        T: DeserializeOwned,
    {
        params.push(("page".to_string(), page.to_string()));
        self.get(path, params).await
    }
}

/// Map a raw TMDB response to a record or an error.
fn decode_response<T>(status: StatusCode, body: &str) -> AppResult<T>
where
    T: DeserializeOwned,
{
    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized);
    }

    if !status.is_success() {
        let message = serde_json::from_str::<TmdbErrorBody>(body)
            .ok()
            .and_then(|b| b.status_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(body)?)
}

fn language(language: &str) -> Params {
    vec![("language".to_string(), language.to_string())]
}

fn search_params(query: &str, lang: &str) -> Params {
    let mut params = language(lang);
    params.push(("query".to_string(), query.to_string()));
    params.push(("include_adult".to_string(), "false".to_string()));
    params
}

fn discover_params(filter: &DiscoverFilter, kind: MediaKind, lang: &str) -> Params {
    let year_key = match kind {
        MediaKind::Movie => "primary_release_year",
        MediaKind::Tv => "first_air_date_year",
    };
    let mut params = language(lang);
    params.extend(filter.query_pairs(year_key));
    params
}

/// Regional movie rating, preferring the theatrical release.
fn pick_movie_certification(response: ReleaseDatesResponse, region: &str) -> Option<String> {
    let country = response
        .results
        .into_iter()
        .find(|c| c.iso_3166_1.eq_ignore_ascii_case(region))?;

    let mut rated: Vec<ReleaseDate> = country
        .release_dates
        .into_iter()
        .filter(|d| !d.certification.trim().is_empty())
        .collect();
    rated.sort_by_key(|d| d.release_type != THEATRICAL_RELEASE);

    rated.into_iter().next().map(|d| d.certification.trim().to_string())
}

fn pick_tv_rating(response: ContentRatingsResponse, region: &str) -> Option<String> {
    response
        .results
        .into_iter()
        .find(|r| r.iso_3166_1.eq_ignore_ascii_case(region) && !r.rating.trim().is_empty())
        .map(|r| r.rating.trim().to_string())
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
        lang: &str,
    ) -> AppResult<Page<MovieSummary>> {
        let path = format!("/movie/{}", list.path_segment());
        self.get_page(&path, page, language(lang)).await
    }

    async fn discover_movies(
        &self,
        filter: &DiscoverFilter,
        page: u32,
        lang: &str,
    ) -> AppResult<Page<MovieSummary>> {
        let params = discover_params(filter, MediaKind::Movie, lang);
        self.get_page("/discover/movie", page, params).await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &str,
    ) -> AppResult<Page<MovieSummary>> {
        self.get_page("/search/movie", page, search_params(query, lang))
            .await
    }

    async fn movie_details(&self, id: i64, lang: &str) -> AppResult<MovieDetail> {
        self.get(&format!("/movie/{}", id), language(lang)).await
    }

    async fn tv_list(&self, list: TvList, page: u32, lang: &str) -> AppResult<Page<TvSummary>> {
        let path = format!("/tv/{}", list.path_segment());
        self.get_page(&path, page, language(lang)).await
    }

    async fn discover_tv(
        &self,
        filter: &DiscoverFilter,
        page: u32,
        lang: &str,
    ) -> AppResult<Page<TvSummary>> {
        let params = discover_params(filter, MediaKind::Tv, lang);
        self.get_page("/discover/tv", page, params).await
    }

    async fn search_tv(&self, query: &str, page: u32, lang: &str) -> AppResult<Page<TvSummary>> {
        self.get_page("/search/tv", page, search_params(query, lang))
            .await
    }

    async fn tv_details(&self, id: i64, lang: &str) -> AppResult<TvDetail> {
        self.get(&format!("/tv/{}", id), language(lang)).await
    }

    async fn tv_season(&self, id: i64, season_number: i64, lang: &str) -> AppResult<SeasonDetail> {
        self.get(&format!("/tv/{}/season/{}", id, season_number), language(lang))
            .await
    }

    async fn popular_people(&self, page: u32, lang: &str) -> AppResult<Page<PersonSummary>> {
        self.get_page("/person/popular", page, language(lang)).await
    }

    async fn search_people(
        &self,
        query: &str,
        page: u32,
        lang: &str,
    ) -> AppResult<Page<PersonSummary>> {
        self.get_page("/search/person", page, search_params(query, lang))
            .await
    }

    async fn person_details(&self, id: i64, lang: &str) -> AppResult<PersonDetail> {
        self.get(&format!("/person/{}", id), language(lang)).await
    }

    async fn person_credits(&self, id: i64, lang: &str) -> AppResult<PersonCredits> {
        self.get(&format!("/person/{}/combined_credits", id), language(lang))
            .await
    }

    async fn person_images(&self, id: i64) -> AppResult<ProfileImages> {
        self.get(&format!("/person/{}/images", id), Vec::new()).await
    }

    async fn credits(&self, kind: MediaKind, id: i64, lang: &str) -> AppResult<Credits> {
        let path = format!("/{}/{}/credits", kind.path_segment(), id);
        self.get(&path, language(lang)).await
    }

    async fn images(&self, kind: MediaKind, id: i64) -> AppResult<Images> {
        let path = format!("/{}/{}/images", kind.path_segment(), id);
        self.get(&path, Vec::new()).await
    }

    async fn videos(&self, kind: MediaKind, id: i64, lang: &str) -> AppResult<Vec<Video>> {
        let path = format!("/{}/{}/videos", kind.path_segment(), id);
        let response: VideosResponse = self.get(&path, language(lang)).await?;
        Ok(response.results)
    }

    async fn watch_providers(
        &self,
        kind: MediaKind,
        id: i64,
        region: &str,
    ) -> AppResult<Option<RegionProviders>> {
        let path = format!("/{}/{}/watch/providers", kind.path_segment(), id);
        let mut response: WatchProviderResults = self.get(&path, Vec::new()).await?;
        Ok(response.results.remove(&region.to_ascii_uppercase()))
    }

    async fn certification(
        &self,
        kind: MediaKind,
        id: i64,
        region: &str,
    ) -> AppResult<Option<String>> {
        match kind {
            MediaKind::Movie => {
                let path = format!("/movie/{}/release_dates", id);
                let response: ReleaseDatesResponse = self.get(&path, Vec::new()).await?;
                Ok(pick_movie_certification(response, region))
            }
            MediaKind::Tv => {
                let path = format!("/tv/{}/content_ratings", id);
                let response: ContentRatingsResponse = self.get(&path, Vec::new()).await?;
                Ok(pick_tv_rating(response, region))
            }
        }
    }

    async fn genres(&self, kind: MediaKind, lang: &str) -> AppResult<Vec<Genre>> {
        let path = format!("/genre/{}/list", kind.path_segment());
        let response: GenresResponse = self.get(&path, language(lang)).await?;
        Ok(response.genres)
    }
}
