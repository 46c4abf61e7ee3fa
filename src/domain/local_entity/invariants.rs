use super::entity::LocalEntity;
use crate::domain::{DomainError, DomainResult};

/// Validates a saved entity before it is written
pub fn validate_local_entity(entity: &LocalEntity) -> DomainResult<()> {
    if entity.id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Saved {} must have a positive id, got {}",
            entity.kind, entity.id
        )));
    }

    if entity.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Saved {} {} has an empty title",
            entity.kind, entity.id
        )));
    }

    Ok(())
}
