use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{MovieDetail, MovieSummary, TvDetail, TvSummary};
use crate::domain::MediaKind;

/// A movie or show the user has favorited and/or watch-listed.
///
/// The record is a denormalized snapshot: title and poster are copied
/// from the catalog at toggle time and never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalEntity {
    pub kind: MediaKind,

    /// Remote TMDB identifier, also the local primary key
    pub id: i64,

    pub title: String,

    pub poster_path: Option<String>,

    pub is_favorite: bool,

    pub is_in_watchlist: bool,

    /// Last time either flag was written
    pub updated_at: DateTime<Utc>,
}

/// Flag to flip on a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedFlag {
    Favorite,
    Watchlist,
}

impl LocalEntity {
    /// Create an unflagged record from a catalog snapshot
    pub fn new(kind: MediaKind, id: i64, title: String, poster_path: Option<String>) -> Self {
        Self {
            kind,
            id,
            title,
            poster_path,
            is_favorite: false,
            is_in_watchlist: false,
            updated_at: Utc::now(),
        }
    }

    /// Unflagged record for an item that has never been saved
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        Self::new(
            snapshot.kind,
            snapshot.id,
            snapshot.title.clone(),
            snapshot.poster_path.clone(),
        )
    }

    /// Flip one flag, refreshing the snapshot fields as well.
    pub fn toggled(mut self, flag: SavedFlag, title: String, poster_path: Option<String>) -> Self {
        match flag {
            SavedFlag::Favorite => self.is_favorite = !self.is_favorite,
            SavedFlag::Watchlist => self.is_in_watchlist = !self.is_in_watchlist,
        }
        self.title = title;
        self.poster_path = poster_path;
        self.updated_at = Utc::now();
        self
    }

    /// Neither favorite nor watch-listed; such records are deleted, not stored.
    pub fn is_unflagged(&self) -> bool {
        !self.is_favorite && !self.is_in_watchlist
    }

    pub fn flags(&self) -> SavedFlags {
        SavedFlags {
            is_favorite: self.is_favorite,
            is_in_watchlist: self.is_in_watchlist,
        }
    }
}

/// Flag pair surfaced to detail screens after a read or toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFlags {
    pub is_favorite: bool,
    pub is_in_watchlist: bool,
}

impl SavedFlags {
    pub fn has(&self, flag: SavedFlag) -> bool {
        match flag {
            SavedFlag::Favorite => self.is_favorite,
            SavedFlag::Watchlist => self.is_in_watchlist,
        }
    }
}

/// What a detail screen knows about an item when the user toggles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub kind: MediaKind,
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
}

impl From<&LocalEntity> for CatalogSnapshot {
    fn from(entity: &LocalEntity) -> Self {
        Self {
            kind: entity.kind,
            id: entity.id,
            title: entity.title.clone(),
            poster_path: entity.poster_path.clone(),
        }
    }
}

impl From<&MovieDetail> for CatalogSnapshot {
    fn from(movie: &MovieDetail) -> Self {
        Self {
            kind: MediaKind::Movie,
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

impl From<&MovieSummary> for CatalogSnapshot {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            kind: MediaKind::Movie,
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

impl From<&TvDetail> for CatalogSnapshot {
    fn from(show: &TvDetail) -> Self {
        Self {
            kind: MediaKind::Tv,
            id: show.id,
            title: show.name.clone(),
            poster_path: show.poster_path.clone(),
        }
    }
}

impl From<&TvSummary> for CatalogSnapshot {
    fn from(show: &TvSummary) -> Self {
        Self {
            kind: MediaKind::Tv,
            id: show.id,
            title: show.name.clone(),
            poster_path: show.poster_path.clone(),
        }
    }
}
