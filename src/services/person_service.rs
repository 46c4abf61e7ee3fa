// src/services/person_service.rs

use std::sync::Arc;

use crate::domain::{Page, PersonCredits, PersonDetail, PersonSummary, ProfileImages};
use crate::error::AppResult;
use crate::repositories::PersonRepository;

pub struct PersonService {
    person_repo: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(person_repo: Arc<dyn PersonRepository>) -> Self {
        Self { person_repo }
    }

    pub async fn popular(&self, page: u32) -> AppResult<Page<PersonSummary>> {
        log::debug!("Loading popular people, page {}", page);
        self.person_repo.popular(page).await
    }

    pub async fn search(&self, query: &str, page: u32) -> AppResult<Page<PersonSummary>> {
        log::debug!("Searching people for {:?}, page {}", query, page);
        self.person_repo.search(query, page).await
    }

    pub async fn details(&self, id: i64) -> AppResult<PersonDetail> {
        self.person_repo.details(id).await
    }

    pub async fn credits(&self, id: i64) -> AppResult<PersonCredits> {
        self.person_repo.credits(id).await
    }

    pub async fn images(&self, id: i64) -> AppResult<ProfileImages> {
        self.person_repo.images(id).await
    }
}
