// src/application/view_models/mod.rs
//
// View-state holders
//
// ARCHITECTURE:
// - One holder per catalog kind plus My Space
// - Every observable is a tokio `watch` channel; renderers subscribe
// - One ErrorSlot per holder, shared by all of its feeds
// - Paging lives in PagedFeed / SearchFeed, written once
// - Background loads are owned by a TaskScope and die with the holder

pub mod error_slot;
pub mod movie;
pub mod my_space;
pub mod paged_feed;
pub mod person;
pub mod scope;
pub mod search_feed;
pub mod tv;

#[cfg(test)]
mod test_support;

pub use error_slot::ErrorSlot;
pub use movie::{MovieDetailState, MovieFeed, MovieViewModel, MovieViewState};
pub use my_space::{MySpaceState, MySpaceViewModel};
pub use paged_feed::{FeedState, LoadOutcome, PagedFeed};
pub use person::{PersonDetailState, PersonFeed, PersonViewModel, PersonViewState};
pub use scope::TaskScope;
pub use search_feed::{SearchFeed, SearchOutcome};
pub use tv::{TvDetailState, TvFeed, TvViewModel, TvViewState};

use tokio::sync::watch;

use crate::error::AppResult;

/// Detail screen state keyed by the id it was opened for.
pub trait DetailState {
    fn current_id(&self) -> Option<i64>;
}

/// Fold one part of a detail load into `state`.
///
/// Results for an id that is no longer open are discarded; failures go to
/// the error slot either way.
pub(crate) fn publish_part<S, V>(
    state: &watch::Sender<S>,
    errors: &ErrorSlot,
    id: i64,
    context: &str,
    result: AppResult<V>,
    apply: impl FnOnce(&mut S, V),
) where
    S: DetailState,
{
    match result {
        Ok(value) => {
            let applied = state.send_if_modified(|current| {
                if current.current_id() != Some(id) {
                    return false;
                }
                apply(current, value);
                true
            });
            if !applied {
                log::debug!("{} for {} arrived after the screen moved on", context, id);
            }
        }
        Err(error) => errors.report(context, &error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[derive(Default)]
    struct Screen {
        id: Option<i64>,
        title: Option<String>,
    }

    impl DetailState for Screen {
        fn current_id(&self) -> Option<i64> {
            self.id
        }
    }

    #[test]
    fn test_part_for_open_id_is_applied() {
        let (state, _) = watch::channel(Screen {
            id: Some(7),
            ..Default::default()
        });
        let errors = ErrorSlot::new();

        publish_part(&state, &errors, 7, "detail", Ok("Heat".to_string()), |s, v| {
            s.title = Some(v)
        });

        assert_eq!(state.borrow().title.as_deref(), Some("Heat"));
        assert!(errors.current().is_none());
    }

    #[test]
    fn test_stale_part_is_discarded() {
        let (state, _) = watch::channel(Screen {
            id: Some(8),
            ..Default::default()
        });
        let errors = ErrorSlot::new();

        publish_part(&state, &errors, 7, "detail", Ok("Heat".to_string()), |s, v| {
            s.title = Some(v)
        });

        assert!(state.borrow().title.is_none());
    }

    #[test]
    fn test_failed_part_reports() {
        let (state, _) = watch::channel(Screen::default());
        let errors = ErrorSlot::new();

        publish_part::<_, String>(
            &state,
            &errors,
            7,
            "movie credits",
            Err(AppError::Other("timed out".to_string())),
            |s, v| s.title = Some(v),
        );

        let message = errors.current().unwrap();
        assert!(message.contains("timed out"));
    }
}
