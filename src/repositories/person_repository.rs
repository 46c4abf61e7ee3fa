// src/repositories/person_repository.rs
//
// People are never saved locally; remote only.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LocalePreference;
use crate::domain::{Page, PersonCredits, PersonDetail, PersonSummary, ProfileImages};
use crate::error::AppResult;
use crate::integrations::CatalogApi;

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn popular(&self, page: u32) -> AppResult<Page<PersonSummary>>;
    async fn search(&self, query: &str, page: u32) -> AppResult<Page<PersonSummary>>;
    async fn details(&self, id: i64) -> AppResult<PersonDetail>;
    async fn credits(&self, id: i64) -> AppResult<PersonCredits>;
    async fn images(&self, id: i64) -> AppResult<ProfileImages>;
}

pub struct CatalogPersonRepository {
    api: Arc<dyn CatalogApi>,
    locale: Arc<LocalePreference>,
}

impl CatalogPersonRepository {
    pub fn new(api: Arc<dyn CatalogApi>, locale: Arc<LocalePreference>) -> Self {
        Self { api, locale }
    }
}

#[async_trait]
impl PersonRepository for CatalogPersonRepository {
    async fn popular(&self, page: u32) -> AppResult<Page<PersonSummary>> {
        self.api.popular_people(page, &self.locale.language()).await
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Page<PersonSummary>> {
        self.api
            .search_people(query, page, &self.locale.language())
            .await
    }

    async fn details(&self, id: i64) -> AppResult<PersonDetail> {
        self.api.person_details(id, &self.locale.language()).await
    }

    async fn credits(&self, id: i64) -> AppResult<PersonCredits> {
        self.api.person_credits(id, &self.locale.language()).await
    }

    async fn images(&self, id: i64) -> AppResult<ProfileImages> {
        self.api.person_images(id).await
    }
}
