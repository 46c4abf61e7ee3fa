use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{ErrorSlot, LoadOutcome, PagedFeed};
use crate::domain::Page;
use crate::error::AppResult;

/// What happened to a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Another search was in flight; this one was ignored
    Dropped,
    /// Blank query; results cleared, nothing fetched
    Cleared,
    Loaded(LoadOutcome),
}

/// A paged feed driven by a text query, guarded by a single in-flight latch.
pub struct SearchFeed<T> {
    feed: PagedFeed<T>,
    query: Arc<Mutex<String>>,
    in_flight: Arc<AtomicBool>,
}

impl<T> Clone for SearchFeed<T> {
    fn clone(&self) -> Self {
        Self {
            feed: self.feed.clone(),
            query: Arc::clone(&self.query),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Releases the latch even if the search future is dropped mid-flight.
struct LatchGuard<'a>(&'a AtomicBool);

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T> SearchFeed<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, errors: ErrorSlot) -> Self {
        Self {
            feed: PagedFeed::new(name, errors),
            query: Arc::new(Mutex::new(String::new())),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn feed(&self) -> &PagedFeed<T> {
        &self.feed
    }

    pub fn query(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run `query`. A new query starts over from page 1 with an empty list;
    /// the current query again fetches its next page.
    pub async fn search<F, Fut>(&self, query: &str, fetch: F) -> SearchOutcome
    where
        F: FnOnce(String, u32) -> Fut,
        Fut: Future<Output = AppResult<Page<T>>>,
    {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            log::debug!("{}: search for {:?} dropped, one in flight", self.feed.name(), query);
            return SearchOutcome::Dropped;
        }
        let _latch = LatchGuard(&self.in_flight);

        let query = query.trim().to_string();
        if query.is_empty() {
            self.set_query(String::new());
            self.feed.reset();
            return SearchOutcome::Cleared;
        }

        if query != self.query() {
            self.set_query(query.clone());
            self.feed.reset();
        }

        let outcome = self.feed.load_next(|page| fetch(query, page)).await;
        SearchOutcome::Loaded(outcome)
    }

    /// Next page of the current query; a no-op without one.
    pub async fn load_more<F, Fut>(&self, fetch: F) -> SearchOutcome
    where
        F: FnOnce(String, u32) -> Fut,
        Fut: Future<Output = AppResult<Page<T>>>,
    {
        let query = self.query();
        if query.is_empty() {
            return SearchOutcome::Cleared;
        }
        self.search(&query, fetch).await
    }

    fn set_query(&self, query: String) {
        *self
            .query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = query;
    }
}
