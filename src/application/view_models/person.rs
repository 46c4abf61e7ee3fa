// src/application/view_models/person.rs
//
// People holder: popular feed, search, person detail with combined
// credits and profile images.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{
    publish_part, DetailState, ErrorSlot, LoadOutcome, PagedFeed, SearchFeed, SearchOutcome,
    TaskScope,
};
use crate::domain::{PersonCredits, PersonDetail, PersonSummary, ProfileImages};
use crate::services::PersonService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonFeed {
    Popular,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonDetailState {
    pub id: Option<i64>,
    pub detail: Option<PersonDetail>,
    pub credits: Option<PersonCredits>,
    pub images: Option<ProfileImages>,
}

impl DetailState for PersonDetailState {
    fn current_id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Clone)]
pub struct PersonViewState {
    service: Arc<PersonService>,
    errors: ErrorSlot,
    popular: PagedFeed<PersonSummary>,
    search: SearchFeed<PersonSummary>,
    detail: Arc<watch::Sender<PersonDetailState>>,
}

impl PersonViewState {
    pub fn new(service: Arc<PersonService>) -> Self {
        let errors = ErrorSlot::new();
        let (detail, _) = watch::channel(PersonDetailState::default());

        Self {
            service,
            popular: PagedFeed::new("popular people", errors.clone()),
            search: SearchFeed::new("people search", errors.clone()),
            detail: Arc::new(detail),
            errors,
        }
    }

    pub fn feed(&self, which: PersonFeed) -> &PagedFeed<PersonSummary> {
        match which {
            PersonFeed::Popular => &self.popular,
        }
    }

    pub async fn load_more(&self, which: PersonFeed) -> LoadOutcome {
        let service = Arc::clone(&self.service);
        self.feed(which)
            .load_next(|page| async move { service.popular(page).await })
            .await
    }

    pub fn search_feed(&self) -> &SearchFeed<PersonSummary> {
        &self.search
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let service = Arc::clone(&self.service);
        self.search
            .search(query, |query, page| async move {
                service.search(&query, page).await
            })
            .await
    }

    pub async fn search_more(&self) -> SearchOutcome {
        let service = Arc::clone(&self.service);
        self.search
            .load_more(|query, page| async move { service.search(&query, page).await })
            .await
    }

    pub fn detail(&self) -> PersonDetailState {
        self.detail.borrow().clone()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<PersonDetailState> {
        self.detail.subscribe()
    }

    pub async fn open(&self, id: i64) {
        self.detail.send_replace(PersonDetailState {
            id: Some(id),
            ..Default::default()
        });

        tokio::join!(
            self.load_detail(id),
            self.load_credits(id),
            self.load_images(id)
        );
    }

    pub async fn load_detail(&self, id: i64) {
        let result = self.service.details(id).await;
        publish_part(&self.detail, &self.errors, id, "person details", result, |s, v| {
            s.detail = Some(v)
        });
    }

    pub async fn load_credits(&self, id: i64) {
        let result = self.service.credits(id).await;
        publish_part(&self.detail, &self.errors, id, "person credits", result, |s, v| {
            s.credits = Some(v)
        });
    }

    pub async fn load_images(&self, id: i64) {
        let result = self.service.images(id).await;
        publish_part(&self.detail, &self.errors, id, "person images", result, |s, v| {
            s.images = Some(v)
        });
    }

    pub fn error(&self) -> Option<String> {
        self.errors.current()
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.errors.subscribe()
    }
}

pub struct PersonViewModel {
    state: PersonViewState,
    scope: TaskScope,
}

impl PersonViewModel {
    pub fn new(service: Arc<PersonService>) -> Self {
        Self {
            state: PersonViewState::new(service),
            scope: TaskScope::new(),
        }
    }

    pub fn spawn_load_more(&self, which: PersonFeed) {
        let state = self.state.clone();
        self.scope.spawn(async move {
            state.load_more(which).await;
        });
    }

    pub fn spawn_open(&self, id: i64) {
        let state = self.state.clone();
        self.scope.spawn(async move {
            state.open(id).await;
        });
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }
}

impl Deref for PersonViewModel {
    type Target = PersonViewState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}
