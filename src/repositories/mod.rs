// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB adapters
// - NO business logic
// - NO invariant enforcement
// - Remote calls forward to CatalogApi with the current locale
// - Local calls forward to the saved-entity store
// - Explicit SQL only

pub mod local_entity_repository;
pub mod movie_repository;
pub mod person_repository;
pub mod tv_repository;

pub use local_entity_repository::{LocalEntityRepository, SqliteLocalEntityRepository};
pub use movie_repository::{CatalogMovieRepository, MovieRepository};
pub use person_repository::{CatalogPersonRepository, PersonRepository};
pub use tv_repository::{CatalogTvRepository, TvRepository};

#[cfg(test)]
pub use local_entity_repository::MockLocalEntityRepository;
