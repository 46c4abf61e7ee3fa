use std::sync::Arc;

use tokio::sync::watch;

use crate::application::error_handling::user_message;
use crate::error::AppError;

/// The single nullable error message of a view-state holder.
///
/// Cloned into every feed of the holder; each failure overwrites the
/// previous message.
#[derive(Clone)]
pub struct ErrorSlot {
    message: Arc<watch::Sender<Option<String>>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        let (message, _) = watch::channel(None);
        Self {
            message: Arc::new(message),
        }
    }

    pub fn set(&self, message: impl Into<String>) {
        self.message.send_replace(Some(message.into()));
    }

    /// Log a failure and surface it as the current message.
    pub fn report(&self, context: &str, error: &AppError) {
        let message = user_message(context, error);
        if error.is_remote() {
            log::warn!("{}", message);
        } else {
            log::error!("{}", message);
        }
        self.set(message);
    }

    pub fn clear(&self) {
        self.message.send_replace(None);
    }

    pub fn current(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.message.subscribe()
    }
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::new()
    }
}
