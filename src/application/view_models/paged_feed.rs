use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::ErrorSlot;
use crate::application::error_handling::NO_MORE_ITEMS;
use crate::domain::Page;
use crate::error::AppResult;

/// Observable contents of one paginated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    /// Next page to request; TMDB pages start at 1
    pub next_page: u32,
    /// Known after the first successful page
    pub total_pages: Option<u32>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            total_pages: None,
        }
    }
}

/// Result of one `load_next` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items appended, cursor advanced
    Appended(usize),
    /// Empty page; cursor left where it was
    Exhausted,
    /// Fetch failed; list left untouched
    Failed,
}

/// One paginated list: append-only items plus a page cursor.
///
/// The page number is read before the fetch and the list is mutated after
/// it, so overlapping loads are neither de-duplicated nor ordered.
pub struct PagedFeed<T> {
    name: &'static str,
    state: Arc<watch::Sender<FeedState<T>>>,
    errors: ErrorSlot,
}

impl<T> Clone for PagedFeed<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: Arc::clone(&self.state),
            errors: self.errors.clone(),
        }
    }
}

impl<T> PagedFeed<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// `name` is used in error messages, e.g. "popular movies".
    pub fn new(name: &'static str, errors: ErrorSlot) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            name,
            state: Arc::new(state),
            errors,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next_page(&self) -> u32 {
        self.state.borrow().next_page
    }

    /// Drop all items and rewind the cursor to page 1.
    pub fn reset(&self) {
        self.state.send_replace(FeedState::default());
    }

    /// True when the row at `visible_index` is the last loaded one.
    pub fn should_load_more(&self, visible_index: usize) -> bool {
        let len = self.len();
        len > 0 && visible_index + 1 >= len
    }

    /// Fetch the page under the cursor and fold the result into the list.
    pub async fn load_next<F, Fut>(&self, fetch: F) -> LoadOutcome
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = AppResult<Page<T>>>,
    {
        let page = self.next_page();
        let result = fetch(page).await;
        self.apply(result)
    }

    pub fn apply(&self, result: AppResult<Page<T>>) -> LoadOutcome {
        match result {
            Ok(page) if page.results.is_empty() => {
                log::debug!("{}: page {} is empty", self.name, page.page);
                self.errors.set(NO_MORE_ITEMS);
                LoadOutcome::Exhausted
            }
            Ok(page) => {
                let count = page.results.len();
                let total_pages = page.total_pages;
                self.state.send_modify(|state| {
                    state.items.extend(page.results);
                    state.next_page += 1;
                    state.total_pages = Some(total_pages);
                });
                log::debug!("{}: appended {} items", self.name, count);
                LoadOutcome::Appended(count)
            }
            Err(error) => {
                self.errors.report(self.name, &error);
                LoadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn feed() -> (PagedFeed<i64>, ErrorSlot) {
        let errors = ErrorSlot::new();
        (PagedFeed::new("numbers", errors.clone()), errors)
    }

    fn page_of(page: u32, items: Vec<i64>) -> AppResult<Page<i64>> {
        Ok(Page::new(page, items, 10))
    }

    #[tokio::test]
    async fn test_pages_append_in_request_order() {
        let (feed, errors) = feed();
        let pages = vec![vec![1, 2, 3], vec![4], vec![5, 6]];

        for items in pages {
            let outcome = feed.load_next(|page| async move { page_of(page, items) }).await;
            assert!(matches!(outcome, LoadOutcome::Appended(_)));
        }

        assert_eq!(feed.items(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(feed.next_page(), 4);
        assert_eq!(feed.snapshot().total_pages, Some(10));
        assert!(errors.current().is_none());
    }

    #[tokio::test]
    async fn test_cursor_is_passed_to_fetch() {
        let (feed, _) = feed();
        let mut requested = Vec::new();
        for _ in 0..3 {
            feed.load_next(|page| {
                requested.push(page);
                async move { page_of(page, vec![page as i64]) }
            })
            .await;
        }
        assert_eq!(requested, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_page_keeps_cursor() {
        let (feed, errors) = feed();
        feed.load_next(|page| async move { page_of(page, vec![1]) }).await;

        let outcome = feed
            .load_next(|page| async move { Ok(Page::empty(page)) })
            .await;

        assert_eq!(outcome, LoadOutcome::Exhausted);
        assert_eq!(feed.next_page(), 2);
        assert_eq!(feed.items(), vec![1]);
        assert_eq!(errors.current().as_deref(), Some(NO_MORE_ITEMS));
    }

    #[tokio::test]
    async fn test_failure_keeps_items() {
        let (feed, errors) = feed();
        feed.load_next(|page| async move { page_of(page, vec![1, 2]) }).await;

        let outcome = feed
            .load_next(|_| async { Err(AppError::Other("connection reset".to_string())) })
            .await;

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(feed.items(), vec![1, 2]);
        assert_eq!(feed.next_page(), 2);
        let message = errors.current().unwrap();
        assert!(message.contains("connection reset"));
        assert!(message.contains("numbers"));
    }

    #[tokio::test]
    async fn test_overlapping_loads_both_append() {
        let (feed, _) = feed();
        // Both read the cursor before either lands
        let first = feed.next_page();
        let second = feed.next_page();
        feed.apply(page_of(first, vec![1, 2]));
        feed.apply(page_of(second, vec![1, 2]));

        assert_eq!(feed.items(), vec![1, 2, 1, 2]);
        assert_eq!(feed.next_page(), 3);
    }

    #[test]
    fn test_reset() {
        let (feed, _) = feed();
        feed.apply(page_of(1, vec![1]));
        feed.reset();
        assert!(feed.is_empty());
        assert_eq!(feed.next_page(), 1);
        assert_eq!(feed.snapshot().total_pages, None);
    }

    #[test]
    fn test_should_load_more_on_last_row() {
        let (feed, _) = feed();
        assert!(!feed.should_load_more(0));
        feed.apply(page_of(1, vec![1, 2, 3]));
        assert!(!feed.should_load_more(1));
        assert!(feed.should_load_more(2));
    }

    #[tokio::test]
    async fn test_subscriber_sees_appends() {
        let (feed, _) = feed();
        let mut rx = feed.subscribe();
        feed.apply(page_of(1, vec![7]));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().items, vec![7]);
    }
}
