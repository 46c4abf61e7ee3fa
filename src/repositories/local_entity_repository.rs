// src/repositories/local_entity_repository.rs
//
// Saved movies/shows persistence. Table chosen by MediaKind.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{LocalEntity, MediaKind};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait LocalEntityRepository: Send + Sync {
    /// Insert or replace the whole record
    fn save(&self, entity: &LocalEntity) -> AppResult<()>;
    fn get_by_id(&self, kind: MediaKind, id: i64) -> AppResult<Option<LocalEntity>>;
    fn list_favorites(&self, kind: MediaKind) -> AppResult<Vec<LocalEntity>>;
    fn list_watchlist(&self, kind: MediaKind) -> AppResult<Vec<LocalEntity>>;
    fn delete(&self, kind: MediaKind, id: i64) -> AppResult<()>;
}

pub struct SqliteLocalEntityRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteLocalEntityRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to LocalEntity - returns rusqlite::Error for query_map compatibility
    fn row_to_entity(kind: MediaKind, row: &Row) -> Result<LocalEntity, rusqlite::Error> {
        let updated_at_str: String = row.get("updated_at")?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(LocalEntity {
            kind,
            id: row.get("id")?,
            title: row.get("title")?,
            poster_path: row.get("poster_path")?,
            is_favorite: row.get("is_favorite")?,
            is_in_watchlist: row.get("is_in_watchlist")?,
            updated_at,
        })
    }

    fn list_where(&self, kind: MediaKind, flag_column: &str) -> AppResult<Vec<LocalEntity>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, poster_path, is_favorite, is_in_watchlist, updated_at
             FROM {}
             WHERE {} = 1
             ORDER BY updated_at DESC, id",
            kind.table_name(),
            flag_column
        ))?;

        let entities = stmt
            .query_map([], |row| Self::row_to_entity(kind, row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entities)
    }
}

impl LocalEntityRepository for SqliteLocalEntityRepository {
    fn save(&self, entity: &LocalEntity) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (
                    id, title, poster_path, is_favorite, is_in_watchlist, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                entity.kind.table_name()
            ),
            params![
                entity.id,
                entity.title,
                entity.poster_path,
                entity.is_favorite,
                entity.is_in_watchlist,
                entity.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, kind: MediaKind, id: i64) -> AppResult<Option<LocalEntity>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, poster_path, is_favorite, is_in_watchlist, updated_at
             FROM {} WHERE id = ?1",
            kind.table_name()
        ))?;

        match stmt.query_row(params![id], |row| Self::row_to_entity(kind, row)) {
            Ok(entity) => Ok(Some(entity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_favorites(&self, kind: MediaKind) -> AppResult<Vec<LocalEntity>> {
        self.list_where(kind, "is_favorite")
    }

    fn list_watchlist(&self, kind: MediaKind) -> AppResult<Vec<LocalEntity>> {
        self.list_where(kind, "is_in_watchlist")
    }

    fn delete(&self, kind: MediaKind, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", kind.table_name()),
            params![id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, initialize_database};
    use crate::domain::SavedFlag;
    use chrono::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteLocalEntityRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("store.db")).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, SqliteLocalEntityRepository::new(Arc::new(pool)))
    }

    fn favorite(kind: MediaKind, id: i64, title: &str) -> LocalEntity {
        LocalEntity::new(kind, id, title.to_string(), Some(format!("/{}.jpg", id))).toggled(
            SavedFlag::Favorite,
            title.to_string(),
            Some(format!("/{}.jpg", id)),
        )
    }

    #[test]
    fn test_save_and_get() {
        let (_dir, repo) = setup();
        let entity = favorite(MediaKind::Movie, 603, "The Matrix");
        repo.save(&entity).unwrap();

        let loaded = repo.get_by_id(MediaKind::Movie, 603).unwrap().unwrap();
        assert_eq!(loaded.title, "The Matrix");
        assert_eq!(loaded.poster_path.as_deref(), Some("/603.jpg"));
        assert!(loaded.is_favorite);
        assert!(!loaded.is_in_watchlist);
        assert_eq!(loaded.updated_at.timestamp(), entity.updated_at.timestamp());
    }

    #[test]
    fn test_kinds_use_separate_tables() {
        let (_dir, repo) = setup();
        repo.save(&favorite(MediaKind::Movie, 1, "Movie one")).unwrap();

        assert!(repo.get_by_id(MediaKind::Tv, 1).unwrap().is_none());
        assert!(repo.list_favorites(MediaKind::Tv).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_whole_record() {
        let (_dir, repo) = setup();
        let entity = favorite(MediaKind::Tv, 1399, "Game of Thrones");
        repo.save(&entity).unwrap();

        let updated = entity.toggled(SavedFlag::Watchlist, "GoT".to_string(), None);
        repo.save(&updated).unwrap();

        let loaded = repo.get_by_id(MediaKind::Tv, 1399).unwrap().unwrap();
        assert_eq!(loaded.title, "GoT");
        assert!(loaded.poster_path.is_none());
        assert!(loaded.is_favorite);
        assert!(loaded.is_in_watchlist);
        assert_eq!(repo.list_favorites(MediaKind::Tv).unwrap().len(), 1);
    }

    #[test]
    fn test_lists_filter_by_flag_newest_first() {
        let (_dir, repo) = setup();
        let mut older = favorite(MediaKind::Movie, 1, "Older");
        older.updated_at = older.updated_at - Duration::minutes(5);
        repo.save(&older).unwrap();
        repo.save(&favorite(MediaKind::Movie, 2, "Newer")).unwrap();

        let watch_only = LocalEntity::new(MediaKind::Movie, 3, "Later".to_string(), None)
            .toggled(SavedFlag::Watchlist, "Later".to_string(), None);
        repo.save(&watch_only).unwrap();

        let favorites: Vec<i64> = repo
            .list_favorites(MediaKind::Movie)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(favorites, vec![2, 1]);

        let watchlist = repo.list_watchlist(MediaKind::Movie).unwrap();
        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist[0].id, 3);
    }

    #[test]
    fn test_delete() {
        let (_dir, repo) = setup();
        repo.save(&favorite(MediaKind::Movie, 5, "Gone")).unwrap();

        repo.delete(MediaKind::Movie, 5).unwrap();
        assert!(repo.get_by_id(MediaKind::Movie, 5).unwrap().is_none());
        assert!(matches!(
            repo.delete(MediaKind::Movie, 5),
            Err(AppError::NotFound)
        ));
    }
}
