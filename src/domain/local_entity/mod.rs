pub mod entity;
pub mod invariants;

pub use entity::{CatalogSnapshot, LocalEntity, SavedFlag, SavedFlags};
pub use invariants::validate_local_entity;
