//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::{FormationCatalog, PlayerStore, ScrapeClient};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only formation catalog
    pub formations: Arc<FormationCatalog>,
    /// In-memory player search index
    pub players: Arc<PlayerStore>,
    /// Cached client for the upstream scraper
    pub scraper: Arc<ScrapeClient>,
}

impl AppState {
    pub fn new(
        formations: Arc<FormationCatalog>,
        players: Arc<PlayerStore>,
        scraper: Arc<ScrapeClient>,
    ) -> Self {
        Self {
            formations,
            players,
            scraper,
        }
    }
}
