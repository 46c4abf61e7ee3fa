use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::DomainError;

/// The two catalog kinds that can be favorited or watch-listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by TMDB (`/movie/...`, `/tv/...`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    /// Local table holding saved entities of this kind.
    pub fn table_name(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Tv => "shows",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "show" | "shows" => Ok(MediaKind::Tv),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown media kind: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("show".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("person".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_tables_are_distinct() {
        assert_ne!(MediaKind::Movie.table_name(), MediaKind::Tv.table_name());
    }
}
