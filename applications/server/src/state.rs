/// Shared application state
use crate::{config::ApiSettings, services::MusicService};
use catalog_core::MusicStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub music_service: Arc<MusicService>,
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(music_service: Arc<MusicService>, api: ApiSettings) -> Self {
        Self { music_service, api }
    }

    /// Build the state around any store implementation
    pub fn from_store(store: Arc<dyn MusicStore>, api: ApiSettings) -> Self {
        let music_service = Arc::new(MusicService::new(store, api.max_page_size));
        Self::new(music_service, api)
    }
}
