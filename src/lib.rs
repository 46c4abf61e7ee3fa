// src/lib.rs
// CineHub - Local-first movie and TV catalog browser backed by TMDB
//
// Architecture:
// - Remote catalog: one async trait, one reqwest client (integrations)
// - Local store: favorites and watch list in SQLite (db, repositories)
// - Pass-through layers: repositories inject locale, services validate
// - Application layer: observable view-state holders (application)
// - Explicit: no implicit behavior, no retries, no magic

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_local_entity,
    CatalogSnapshot,
    Credits,
    DiscoverFilter,
    Genre,
    Images,
    // Local entities
    LocalEntity,
    MediaKind,
    // Movies
    MovieDetail,
    MovieList,
    MovieSummary,
    // Paging
    Page,
    // People
    PersonCredits,
    PersonDetail,
    PersonSummary,
    RegionProviders,
    SavedFlag,
    SavedFlags,
    SeasonDetail,
    // Shows
    TvDetail,
    TvList,
    TvSummary,
    Video,
};

// ============================================================================
// PUBLIC API - Errors and configuration
// ============================================================================

pub use config::{AppConfig, LocalePreference};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories and services
// ============================================================================

pub use repositories::{
    CatalogMovieRepository, CatalogPersonRepository, CatalogTvRepository, LocalEntityRepository,
    MovieRepository, PersonRepository, SqliteLocalEntityRepository, TvRepository,
};
pub use services::{MovieService, PersonService, TvService};

// ============================================================================
// PUBLIC API - Application layer
// ============================================================================

pub use application::view_models;
pub use application::AppState;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogApi, TmdbClient};
