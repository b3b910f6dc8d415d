//! Shared application state.

use std::sync::Arc;

use crate::application::services::ShortenerService;

/// State shared by all handlers.
///
/// Cheap to clone; the service and its store handles sit behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>) -> Self {
        Self { shortener }
    }
}
