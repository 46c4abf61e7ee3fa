// Shared fixtures for holder tests: mocked TMDB, real SQLite store.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use crate::config::LocalePreference;
use crate::db::{create_connection_pool, initialize_database};
use crate::domain::{MovieSummary, Page, PersonSummary, TvSummary};
use crate::integrations::tmdb::MockCatalogApi;
use crate::integrations::CatalogApi;
use crate::repositories::{
    CatalogMovieRepository, CatalogPersonRepository, CatalogTvRepository, LocalEntityRepository,
    SqliteLocalEntityRepository,
};
use crate::services::{MovieService, PersonService, TvService};

pub struct Services {
    pub _dir: TempDir,
    pub movies: Arc<MovieService>,
    pub shows: Arc<TvService>,
    pub people: Arc<PersonService>,
}

pub fn services(api: MockCatalogApi) -> Services {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_connection_pool(&dir.path().join("holders.db")).unwrap();
    initialize_database(&pool.get().unwrap()).unwrap();
    let store: Arc<dyn LocalEntityRepository> =
        Arc::new(SqliteLocalEntityRepository::new(Arc::new(pool)));

    services_with_store(api, store, dir)
}

pub fn services_with_store(
    api: MockCatalogApi,
    store: Arc<dyn LocalEntityRepository>,
    dir: TempDir,
) -> Services {
    let api: Arc<dyn CatalogApi> = Arc::new(api);
    let locale = Arc::new(LocalePreference::default());

    Services {
        _dir: dir,
        movies: Arc::new(MovieService::new(Arc::new(CatalogMovieRepository::new(
            api.clone(),
            store.clone(),
            locale.clone(),
        )))),
        shows: Arc::new(TvService::new(Arc::new(CatalogTvRepository::new(
            api.clone(),
            store,
            locale.clone(),
        )))),
        people: Arc::new(PersonService::new(Arc::new(CatalogPersonRepository::new(
            api, locale,
        )))),
    }
}

pub fn movie(id: i64, title: &str) -> MovieSummary {
    serde_json::from_value(json!({ "id": id, "title": title })).unwrap()
}

pub fn show(id: i64, name: &str) -> TvSummary {
    serde_json::from_value(json!({ "id": id, "name": name })).unwrap()
}

pub fn person(id: i64, name: &str) -> PersonSummary {
    serde_json::from_value(json!({ "id": id, "name": name })).unwrap()
}

/// Page `page` of a two-page listing built with `make`.
pub fn page_of<T>(page: u32, ids: &[i64], make: impl Fn(i64) -> T) -> Page<T> {
    Page::new(page, ids.iter().map(|id| make(*id)).collect(), 2)
}
