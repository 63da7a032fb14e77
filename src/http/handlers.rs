//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{
    ExportRequest, ExportResponse, FlipQuery, Formation, HealthResponse, LeaguesResponse, Player,
    ScrapeTeamRequest, ScrapeTeamResponse, SearchQuery, SearchResult, TeamList,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::export;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        formations: state.formations.all().len(),
        players: state.players.len(),
    }))
}

// =============================================================================
// Formations
// =============================================================================

/// GET /api/formations
pub async fn list_formations(State(state): State<AppState>) -> HandlerResult<Vec<Formation>> {
    Ok(Json(state.formations.all().to_vec()))
}

/// GET /api/formations/{id}?flipH=&flipV=
pub async fn get_formation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flip): Query<FlipQuery>,
) -> HandlerResult<Formation> {
    state
        .formations
        .get_flipped(&id, flip.flip_h, flip.flip_v)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("formation not found: {}", id)))
}

/// GET /api/formations/category/{category}
pub async fn formations_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> HandlerResult<Vec<Formation>> {
    let formations = state
        .formations
        .by_category(&category)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(formations))
}

// =============================================================================
// Players
// =============================================================================

/// GET /api/players/search?query=&club=&nationality=&league=&position=&page=&size=
pub async fn search_players(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<SearchResult> {
    Ok(Json(state.players.search(&query.into())))
}

/// GET /api/players/{id}
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Player> {
    state
        .players
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("player not found: {}", id)))
}

/// GET /api/players/clubs
pub async fn list_clubs(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    Ok(Json(state.players.clubs()))
}

/// GET /api/players/nationalities
pub async fn list_nationalities(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    Ok(Json(state.players.nationalities()))
}

/// GET /api/players/leagues
pub async fn list_leagues(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    Ok(Json(state.players.leagues()))
}

// =============================================================================
// Export
// =============================================================================

/// POST /api/lineup/export
///
/// Validates the lineup and resolves the pixel dimensions the client should
/// render at. The actual PNG/JPEG rasterization happens client-side.
pub async fn prepare_export(
    Json(request): Json<ExportRequest>,
) -> HandlerResult<ExportResponse> {
    let metadata = export::prepare_export(&request)?;
    Ok(Json(ExportResponse {
        success: true,
        message: "Ready for export".to_string(),
        metadata: Some(metadata),
    }))
}

/// POST /api/lineup/export/svg
///
/// Renders the lineup server-side and returns the SVG as a download.
pub async fn export_svg(Json(request): Json<ExportRequest>) -> Result<impl IntoResponse, AppError> {
    if request.players.is_empty() {
        return Err(AppError::BadRequest("no players in lineup".to_string()));
    }
    let svg = export::render_svg(&request);
    let filename = format!(
        "lineup-{}-{}.svg",
        request.formation_id,
        chrono::Utc::now().timestamp_millis()
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        svg,
    ))
}

// =============================================================================
// Scraper side-channel
// =============================================================================

/// GET /api/scraper/leagues
pub async fn scraper_leagues(State(state): State<AppState>) -> HandlerResult<LeaguesResponse> {
    Ok(Json(LeaguesResponse {
        leagues: state.scraper.leagues().to_vec(),
    }))
}

/// GET /api/scraper/leagues/{league_id}/teams
pub async fn scraper_teams(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> HandlerResult<TeamList> {
    let teams = state.scraper.teams(&league_id).await?;
    Ok(Json(teams))
}

/// POST /api/scraper/teams/scrape
///
/// Scrape a team's squad on demand and merge the players into the search
/// index, so a follow-up search immediately finds them.
pub async fn scrape_team(
    State(state): State<AppState>,
    Json(request): Json<ScrapeTeamRequest>,
) -> HandlerResult<ScrapeTeamResponse> {
    let scraped = state
        .scraper
        .scrape_team(&request.league_id, &request.team_id)
        .await?;
    state.players.add_players(scraped.players.clone());
    Ok(Json(ScrapeTeamResponse {
        success: true,
        team: scraped.team,
        players: scraped.players,
    }))
}
