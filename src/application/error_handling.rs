// src/application/error_handling.rs
//
// Error → user-facing message
//
// ARCHITECTURE:
// - Every failure reaching a view-state holder becomes ONE string
// - The string always carries the underlying description
// - Categories exist for logging only; the UI sees text

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Message shown when a page comes back empty
pub const NO_MORE_ITEMS: &str = "No more items";

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Could not reach TMDB
    Network,

    /// TMDB answered with an error
    ExternalService,

    /// Local store failure
    Database,

    /// Domain invariant violation
    Validation,

    NotFound,

    Configuration,

    /// Everything else, including undecodable responses
    Internal,
}

impl ErrorType {
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Http(_) => ErrorType::Network,
            AppError::Api { status: 404, .. } | AppError::NotFound => ErrorType::NotFound,
            AppError::Api { .. } | AppError::Unauthorized => ErrorType::ExternalService,
            AppError::Database(_) | AppError::Pool(_) => ErrorType::Database,
            AppError::Domain(_) => ErrorType::Validation,
            AppError::Config(_) => ErrorType::Configuration,
            AppError::Serialization(_) | AppError::Io(_) | AppError::Other(_) => {
                ErrorType::Internal
            }
        }
    }
}

/// Build the message for a failed action, e.g. `context = "popular movies"`.
pub fn user_message(context: &str, error: &AppError) -> String {
    match ErrorType::from_app_error(error) {
        ErrorType::Network => format!(
            "Could not load {}. Check your connection ({})",
            context, error
        ),
        ErrorType::ExternalService | ErrorType::NotFound => {
            format!("Could not load {}: {}", context, error)
        }
        ErrorType::Database => format!("Could not update {}: {}", context, error),
        ErrorType::Validation => format!("Invalid {}: {}", context, error),
        ErrorType::Configuration | ErrorType::Internal => {
            format!("Something went wrong with {}: {}", context, error)
        }
    }
}
