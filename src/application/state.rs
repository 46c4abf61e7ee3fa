// src/application/state.rs
//
// Wiring: config → pool → schema → TMDB client → repositories → services
// → view-state holders.

use std::sync::Arc;

use crate::application::view_models::{
    MovieViewModel, MySpaceViewModel, PersonViewModel, TvViewModel,
};
use crate::config::{AppConfig, LocalePreference};
use crate::db::{create_connection_pool, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::integrations::{CatalogApi, TmdbClient};
use crate::repositories::{
    CatalogMovieRepository, CatalogPersonRepository, CatalogTvRepository, LocalEntityRepository,
    MovieRepository, PersonRepository, SqliteLocalEntityRepository, TvRepository,
};
use crate::services::{MovieService, PersonService, TvService};

/// Everything a front end needs, built once at startup.
/// All fields are Arc-wrapped for sharing across tasks.
pub struct AppState {
    pub config: AppConfig,
    pub locale: Arc<LocalePreference>,
    pub pool: Arc<ConnectionPool>,
    pub movie_service: Arc<MovieService>,
    pub tv_service: Arc<TvService>,
    pub person_service: Arc<PersonService>,
    pub movies: MovieViewModel,
    pub shows: TvViewModel,
    pub people: PersonViewModel,
    pub my_space: MySpaceViewModel,
}

impl AppState {
    /// Open the database and connect to TMDB as configured.
    pub fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let db_path = config.resolve_database_path()?;
        log::info!("Opening database at {}", db_path.display());
        let pool = Arc::new(create_connection_pool(&db_path)?);

        // Initialize schema (idempotent)
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        let api: Arc<dyn CatalogApi> = Arc::new(TmdbClient::from_config(&config)?);
        Ok(Self::with_api(config, pool, api))
    }

    /// Wire the layers around an already-open pool and catalog client.
    pub fn with_api(config: AppConfig, pool: Arc<ConnectionPool>, api: Arc<dyn CatalogApi>) -> Self {
        let locale = Arc::new(LocalePreference::from_config(&config));

        // 1. REPOSITORIES
        let store: Arc<dyn LocalEntityRepository> =
            Arc::new(SqliteLocalEntityRepository::new(pool.clone()));
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(CatalogMovieRepository::new(
            api.clone(),
            store.clone(),
            locale.clone(),
        ));
        let tv_repo: Arc<dyn TvRepository> =
            Arc::new(CatalogTvRepository::new(api.clone(), store, locale.clone()));
        let person_repo: Arc<dyn PersonRepository> =
            Arc::new(CatalogPersonRepository::new(api, locale.clone()));

        // 2. SERVICES
        let movie_service = Arc::new(MovieService::new(movie_repo));
        let tv_service = Arc::new(TvService::new(tv_repo));
        let person_service = Arc::new(PersonService::new(person_repo));

        // 3. VIEW-STATE HOLDERS
        Self {
            movies: MovieViewModel::new(movie_service.clone()),
            shows: TvViewModel::new(tv_service.clone()),
            people: PersonViewModel::new(person_service.clone()),
            my_space: MySpaceViewModel::new(movie_service.clone(), tv_service.clone()),
            config,
            locale,
            pool,
            movie_service,
            tv_service,
            person_service,
        }
    }
}
