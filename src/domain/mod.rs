// src/domain/mod.rs
//
// Domain Root - catalog snapshots, saved entities and domain errors.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod local_entity;
pub mod media_kind;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Remote catalog records
pub use catalog::{
    CastMember, Credits, CrewMember, DiscoverFilter, Episode, Genre, ImageFile, Images,
    KnownFor, MovieDetail, MovieList, MovieSummary, Network, Page, PersonCredit, PersonCredits,
    PersonDetail, PersonSummary, ProfileImages, Provider, RegionProviders, SeasonDetail,
    SeasonSummary, TvDetail, TvList, TvSummary, Video,
};

// Local favorites / watch-list
pub use local_entity::{
    validate_local_entity, CatalogSnapshot, LocalEntity, SavedFlag, SavedFlags,
};

pub use media_kind::MediaKind;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
