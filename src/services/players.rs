//! In-memory player search index.
//!
//! Players are loaded from the scraper's JSON output at startup and can be
//! topped up at runtime by the on-demand scrape endpoint. Matching is
//! diacritics-insensitive so "Ozil" finds "Özil".

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Player;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 50;

/// Search parameters. Absent filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub club: Option<String>,
    pub nationality: Option<String>,
    pub league: Option<String>,
    pub position: Option<String>,
    pub page: usize,
    pub size: usize,
}

impl SearchRequest {
    fn page_size(&self) -> usize {
        if self.size == 0 || self.size > MAX_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            self.size
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub items: Vec<Player>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Wrapper shape of the scraper output files: `{"players": [...]}`.
#[derive(Deserialize)]
struct PlayerFile {
    #[serde(default)]
    players: Vec<RawPlayer>,
}

/// Player entry as written by the scraper. Positions are split into a
/// primary and secondaries on disk but flattened on the wire, and the
/// display name key differs between the two; accept both shapes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayer {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default, alias = "shortName")]
    display_name: Option<String>,
    #[serde(default)]
    positions: Vec<String>,
    #[serde(default)]
    primary_position: Option<String>,
    #[serde(default)]
    secondary_positions: Vec<String>,
    #[serde(default)]
    club: Option<String>,
    #[serde(default)]
    nationality: Option<String>,
    #[serde(default)]
    league: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    number: Option<u32>,
}

impl From<RawPlayer> for Player {
    fn from(raw: RawPlayer) -> Self {
        let mut positions = raw.positions;
        if let Some(primary) = raw.primary_position {
            positions.insert(0, primary);
        }
        positions.extend(raw.secondary_positions);
        Player {
            id: raw.id,
            name: raw.name,
            display_name: raw.display_name,
            positions,
            club: raw.club,
            nationality: raw.nationality,
            league: raw.league,
            photo_url: raw.photo_url,
            number: raw.number,
        }
        .normalized()
    }
}

/// Thread-safe in-memory player store.
pub struct PlayerStore {
    players: RwLock<Vec<Player>>,
    data_dir: Option<String>,
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStore {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(Vec::new()),
            data_dir: None,
        }
    }

    /// Create a store backed by a scraper output directory and load it.
    /// A missing or unreadable directory leaves the store empty; that is a
    /// valid state, not an error.
    pub fn from_data_dir(dir: impl Into<String>) -> Self {
        let store = Self {
            players: RwLock::new(Vec::new()),
            data_dir: Some(dir.into()),
        };
        store.reload();
        store
    }

    /// Re-read all players from the data directory. Returns the new count.
    pub fn reload(&self) -> usize {
        let Some(dir) = self.data_dir.as_deref() else {
            return self.len();
        };
        let loaded = load_players_from_dir(Path::new(dir));
        let mut players = self.players.write();
        *players = loaded;
        info!(count = players.len(), dir, "player store loaded");
        players.len()
    }

    /// Merge players into the store, replacing entries with the same id.
    /// Used by the scrape side-channel to make fresh squads searchable.
    pub fn add_players(&self, incoming: Vec<Player>) {
        let mut players = self.players.write();
        for player in incoming {
            let player = player.normalized();
            match players.iter_mut().find(|p| p.id == player.id) {
                Some(existing) => *existing = player,
                None => players.push(player),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.players.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Player> {
        self.players.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        let players = self.players.read();
        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(normalize);

        let mut filtered: Vec<&Player> = players
            .iter()
            .filter(|p| matches_query(p, query.as_deref()))
            .filter(|p| matches_optional(p.club.as_deref(), request.club.as_deref()))
            .filter(|p| matches_optional(p.nationality.as_deref(), request.nationality.as_deref()))
            .filter(|p| matches_optional(p.league.as_deref(), request.league.as_deref()))
            .filter(|p| matches_position(p, request.position.as_deref()))
            .collect();

        if let Some(q) = query.as_deref() {
            filtered.sort_by_key(|p| std::cmp::Reverse(relevance_score(p, q)));
        }

        let size = request.page_size();
        let total = filtered.len();
        let start = request.page.saturating_mul(size);
        let items: Vec<Player> = filtered
            .into_iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect();

        SearchResult {
            items,
            page: request.page,
            size,
            total,
            total_pages: total.div_ceil(size),
        }
    }

    pub fn clubs(&self) -> Vec<String> {
        self.distinct(|p| p.club.clone())
    }

    pub fn nationalities(&self) -> Vec<String> {
        self.distinct(|p| p.nationality.clone())
    }

    pub fn leagues(&self) -> Vec<String> {
        self.distinct(|p| p.league.clone())
    }

    fn distinct(&self, field: impl Fn(&Player) -> Option<String>) -> Vec<String> {
        let players = self.players.read();
        let mut seen: HashMap<String, ()> = HashMap::new();
        for p in players.iter() {
            if let Some(value) = field(p) {
                seen.entry(value).or_insert(());
            }
        }
        let mut values: Vec<String> = seen.into_keys().collect();
        values.sort();
        values
    }
}

fn load_players_from_dir(dir: &Path) -> Vec<Player> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "scraper output directory not found");
        return Vec::new();
    }

    // A combined file takes precedence over per-team files.
    let combined = dir.join("all-players.json");
    if combined.exists() {
        return load_players_from_file(&combined);
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to list scraper output");
            return Vec::new();
        }
    };

    let mut players = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            players.extend(load_players_from_file(&path));
        }
    }
    players
}

fn load_players_from_file(path: &Path) -> Vec<Player> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to read player file");
            return Vec::new();
        }
    };
    match serde_json::from_str::<PlayerFile>(&contents) {
        Ok(file) => {
            let players: Vec<Player> = file.players.into_iter().map(Player::from).collect();
            info!(file = %path.display(), count = players.len(), "loaded players");
            players
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to parse player file");
            Vec::new()
        }
    }
}

/// Strip diacritics (NFD, drop combining marks) and lowercase.
fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn matches_query(player: &Player, query: Option<&str>) -> bool {
    let Some(query) = query else {
        return true;
    };

    let name = normalize(&player.name);
    let display_name = player
        .display_name
        .as_deref()
        .map(normalize)
        .unwrap_or_default();
    let club = player.club.as_deref().map(normalize).unwrap_or_default();
    let nationality = player
        .nationality
        .as_deref()
        .map(normalize)
        .unwrap_or_default();

    let all_terms_match = query.split_whitespace().all(|term| {
        name.contains(term)
            || display_name.contains(term)
            || club.contains(term)
            || nationality.contains(term)
            || starts_any_word(&name, term)
            || starts_any_word(&display_name, term)
    });
    if all_terms_match {
        return true;
    }

    name.contains(query)
        || display_name.contains(query)
        || club.contains(query)
        || nationality.contains(query)
}

fn starts_any_word(text: &str, term: &str) -> bool {
    !term.is_empty() && text.split_whitespace().any(|word| word.starts_with(term))
}

fn matches_optional(value: Option<&str>, filter: Option<&str>) -> bool {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        None => true,
        Some(filter) => normalize(value.unwrap_or("")).contains(&normalize(filter)),
    }
}

fn matches_position(player: &Player, position: Option<&str>) -> bool {
    match position.map(str::trim).filter(|p| !p.is_empty()) {
        None => true,
        Some(position) => {
            let wanted = position.to_lowercase();
            player
                .positions
                .iter()
                .any(|p| p.to_lowercase().contains(&wanted))
        }
    }
}

/// Ranking for query-driven searches: exact name match first, then name
/// prefixes, surname prefixes, any word prefix, plain substring.
fn relevance_score(player: &Player, query: &str) -> i32 {
    let name = normalize(&player.name);
    let display_name = player
        .display_name
        .as_deref()
        .map(normalize)
        .unwrap_or_default();

    let mut score = 0;
    if name == query || display_name == query {
        score += 1000;
    }
    if name.starts_with(query) || display_name.starts_with(query) {
        score += 500;
    }
    if let Some(surname) = name.split_whitespace().last() {
        if name.contains(' ') && surname.starts_with(query) {
            score += 400;
        }
    }
    if starts_any_word(&name, query) {
        score += 300;
    }
    if name.contains(query) {
        score += 100;
    }
    score
}
