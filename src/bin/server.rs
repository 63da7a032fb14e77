//! Lineup Builder HTTP Server Binary
//!
//! Entry point for the lineup builder REST API server. It loads the
//! configuration, builds the formation catalog and player index, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lineup-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PLAYER_DATA_DIR`: Scraper output directory (default: ../scraper/output)
//! - `SCRAPER_BASE_URL`: Upstream scraper service (default: http://localhost:5001)
//! - `LINEUP_CONFIG`: Path to a TOML config file (default: lineup.toml)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lineup_builder::config::Config;
use lineup_builder::http::{create_router, AppState};
use lineup_builder::services::{FormationCatalog, PlayerStore, ScrapeClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Lineup Builder HTTP Server");

    let config = Config::load()?;

    let formations = Arc::new(FormationCatalog::new());
    info!(count = formations.all().len(), "formation catalog ready");

    let players = Arc::new(PlayerStore::from_data_dir(config.player_data_dir.clone()));
    info!(count = players.len(), "player index ready");

    let scraper = Arc::new(ScrapeClient::new(
        config.scraper_base_url.clone(),
        Duration::from_secs(config.scraper_timeout_secs),
    )?);

    let state = AppState::new(formations, players, scraper);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
