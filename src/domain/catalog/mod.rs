// src/domain/catalog/mod.rs
//
// Catalog records: immutable snapshots of TMDB responses.
// Field names follow the remote JSON; nothing here is mutated locally.

pub mod media;
pub mod movie;
pub mod page;
pub mod person;
pub mod tv;

pub use media::{
    CastMember, Credits, CrewMember, DiscoverFilter, Genre, ImageFile, Images, Provider,
    RegionProviders, Video, WatchProviderResults,
};
pub use movie::{MovieDetail, MovieList, MovieSummary};
pub use page::Page;
pub use person::{KnownFor, PersonCredit, PersonCredits, PersonDetail, PersonSummary, ProfileImages};
pub use tv::{Episode, Network, SeasonDetail, SeasonSummary, TvDetail, TvList, TvSummary};

use chrono::{Datelike, NaiveDate};

/// Year of a TMDB `YYYY-MM-DD` date. TMDB sends `""` for unknown dates.
pub(crate) fn parse_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2024-02-29"), Some(2024));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("soon"), None);
    }
}
