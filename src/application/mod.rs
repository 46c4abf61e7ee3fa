// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above services; the only layer a front end talks to
// - View-state holders own observable state and orchestrate fetches
// - Every failure becomes a user-facing string here, never earlier

pub mod error_handling;
pub mod state;
pub mod view_models;

pub use error_handling::{user_message, ErrorType, NO_MORE_ITEMS};
pub use state::AppState;
pub use view_models::*;
