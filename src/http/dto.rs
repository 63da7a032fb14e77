//! Data Transfer Objects for the HTTP API.
//!
//! Most wire types are re-exported from the models and services, which
//! already derive Serialize/Deserialize with camelCase field names; this
//! module adds the request/response shapes that only exist at the HTTP
//! boundary.

use serde::{Deserialize, Serialize};

// Re-export existing types that are already serializable
pub use crate::models::{Formation, LineupPlayer, LineupSettings, Player, Position};
pub use crate::services::export::{ExportMetadata, ExportRequest};
pub use crate::services::players::{SearchRequest, SearchResult};
pub use crate::services::scraper::{LeagueInfo, ScrapedTeam, TeamInfo, TeamList};

/// Query parameters for the single-formation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlipQuery {
    #[serde(default, rename = "flipH")]
    pub flip_h: bool,
    #[serde(default, rename = "flipV")]
    pub flip_v: bool,
}

/// Query parameters for player search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub size: usize,
}

impl From<SearchQuery> for SearchRequest {
    fn from(q: SearchQuery) -> Self {
        SearchRequest {
            query: q.query,
            club: q.club,
            nationality: q.nationality,
            league: q.league,
            position: q.position,
            page: q.page,
            size: q.size,
        }
    }
}

/// Response for the export preparation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,
}

/// Request body for the on-demand team scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeTeamRequest {
    pub team_id: String,
    pub league_id: String,
}

/// Response for the on-demand team scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeTeamResponse {
    pub success: bool,
    pub team: String,
    pub players: Vec<Player>,
}

/// Wrapper for the league enumeration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaguesResponse {
    pub leagues: Vec<LeagueInfo>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Number of formations in the catalog
    pub formations: usize,
    /// Number of players currently indexed
    pub players: usize,
}
