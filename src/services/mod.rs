// src/services/mod.rs
//
// Services Module - Use-case layer
//
// One service per catalog kind. Services forward to repositories; the
// only logic here is the favorite/watch-list toggle and write validation.

pub mod movie_service;
pub mod person_service;
pub mod tv_service;

pub use movie_service::MovieService;
pub use person_service::PersonService;
pub use tv_service::TvService;

use crate::domain::{CatalogSnapshot, DomainError, MediaKind};
use crate::error::{AppError, AppResult};

/// Reject a snapshot routed to the wrong kind's table
fn ensure_kind(snapshot: &CatalogSnapshot, expected: MediaKind) -> AppResult<()> {
    if snapshot.kind != expected {
        return Err(AppError::Domain(DomainError::InvariantViolation(format!(
            "Expected a {} snapshot, got {} {}",
            expected, snapshot.kind, snapshot.id
        ))));
    }
    Ok(())
}
