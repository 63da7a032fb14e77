//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Formation catalog
        .route("/formations", get(handlers::list_formations))
        .route("/formations/{id}", get(handlers::get_formation))
        .route(
            "/formations/category/{category}",
            get(handlers::formations_by_category),
        )
        // Player search
        .route("/players/search", get(handlers::search_players))
        .route("/players/clubs", get(handlers::list_clubs))
        .route("/players/nationalities", get(handlers::list_nationalities))
        .route("/players/leagues", get(handlers::list_leagues))
        .route("/players/{id}", get(handlers::get_player))
        // Export
        .route("/lineup/export", post(handlers::prepare_export))
        .route("/lineup/export/svg", post(handlers::export_svg))
        // Scraper side-channel
        .route("/scraper/leagues", get(handlers::scraper_leagues))
        .route(
            "/scraper/leagues/{league_id}/teams",
            get(handlers::scraper_teams),
        )
        .route("/scraper/teams/scrape", post(handlers::scrape_team));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Export payloads carry the full lineup plus settings.
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{FormationCatalog, PlayerStore, ScrapeClient};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(
            Arc::new(FormationCatalog::new()),
            Arc::new(PlayerStore::new()),
            Arc::new(ScrapeClient::new("http://localhost:5001", Duration::from_secs(5)).unwrap()),
        );
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
