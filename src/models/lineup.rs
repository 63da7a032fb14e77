//! The lineup assignment model.
//!
//! Holds the current formation choice, the set of assigned players, and the
//! presentation settings. All mutations are synchronous and total: unknown
//! player or position ids are tolerated as no-ops rather than surfaced as
//! errors, because such calls only originate from the UI's own consistent
//! state.
//!
//! Invariants, upheld after every mutation:
//!
//! - a player id appears at most once in the collection
//! - at most one player occupies a given non-null position id

use serde::{Deserialize, Serialize};

use super::player::Player;

pub const DEFAULT_FORMATION: &str = "4-3-3";

/// A player placed on the pitch. Display attributes are copied from the
/// [`Player`] record at assignment time, so later changes to the source
/// record never retroactively alter an already-placed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub player_id: String,
    /// Slot this player occupies; `None` when floating unassigned.
    pub position_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Free-form placement override; `None` snaps to the slot coordinates.
    #[serde(default)]
    pub custom_x: Option<f64>,
    #[serde(default)]
    pub custom_y: Option<f64>,
    /// Per-player override of the global jersey color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_color: Option<String>,
}

impl LineupPlayer {
    /// Snapshot a player record into a slot.
    fn from_player(player: &Player, position_id: &str) -> Self {
        Self {
            player_id: player.id.clone(),
            position_id: Some(position_id.to_string()),
            name: player.name.clone(),
            display_name: player.display_name.clone(),
            photo_url: player.photo_url.clone(),
            number: player.number,
            custom_x: None,
            custom_y: None,
            jersey_color: None,
        }
    }
}

/// The current formation selection plus the players assigned to its slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub formation_id: String,
    pub players: Vec<LineupPlayer>,
}

impl Default for Lineup {
    fn default() -> Self {
        Self {
            formation_id: DEFAULT_FORMATION.to_string(),
            players: Vec::new(),
        }
    }
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch formation without touching the player collection. Players keep
    /// their position id even when the new formation lacks a matching slot;
    /// an orphaned player stays invisible until a matching slot reappears or
    /// it is reassigned. Unknown formation ids are not validated here.
    pub fn select_formation(&mut self, formation_id: impl Into<String>) {
        self.formation_id = formation_id.into();
    }

    /// Insert or relocate a player into a slot. Any prior entry for the same
    /// player and any current occupant of the slot are dropped first (last
    /// write wins; the displaced occupant is removed, not relocated).
    pub fn assign_player(&mut self, player: &Player, position_id: &str) {
        self.players
            .retain(|p| p.player_id != player.id && p.position_id.as_deref() != Some(position_id));
        self.players.push(LineupPlayer::from_player(player, position_id));
    }

    /// Delete the player with this id, if present.
    pub fn remove_player(&mut self, player_id: &str) {
        self.players.retain(|p| p.player_id != player_id);
    }

    /// Exchange the slots of two assigned players, clearing both custom
    /// coordinate pairs so each snaps onto its new slot. No-op unless both
    /// ids resolve to an assigned player.
    pub fn swap_players(&mut self, player_id_a: &str, player_id_b: &str) {
        let Some(a) = self.players.iter().position(|p| p.player_id == player_id_a) else {
            return;
        };
        let Some(b) = self.players.iter().position(|p| p.player_id == player_id_b) else {
            return;
        };
        if a == b {
            return;
        }
        let slot_a = self.players[a].position_id.take();
        let slot_b = self.players[b].position_id.take();
        self.players[a].position_id = slot_b;
        self.players[a].custom_x = None;
        self.players[a].custom_y = None;
        self.players[b].position_id = slot_a;
        self.players[b].custom_x = None;
        self.players[b].custom_y = None;
    }

    /// Relocate a single assigned player, optionally with free-form
    /// coordinates. A different player currently occupying the target slot
    /// is evicted to the unassigned state but kept in the collection, unlike
    /// [`Lineup::assign_player`] which drops the displaced occupant.
    pub fn move_player(
        &mut self,
        player_id: &str,
        position_id: Option<&str>,
        custom_x: Option<f64>,
        custom_y: Option<f64>,
    ) {
        if !self.players.iter().any(|p| p.player_id == player_id) {
            return;
        }
        for p in &mut self.players {
            if p.player_id == player_id {
                p.position_id = position_id.map(str::to_string);
                p.custom_x = custom_x;
                p.custom_y = custom_y;
            } else if position_id.is_some() && p.position_id.as_deref() == position_id {
                p.position_id = None;
            }
        }
    }

    /// Empty the player collection; the formation selection is retained.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn player(&self, player_id: &str) -> Option<&LineupPlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Occupant of a slot, if any.
    pub fn occupant(&self, position_id: &str) -> Option<&LineupPlayer> {
        self.players
            .iter()
            .find(|p| p.position_id.as_deref() == Some(position_id))
    }
}

/// Presentation settings consumed by rendering. A flat record, independent
/// of the lineup itself: mutating settings never invalidates the lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineupSettings {
    pub pitch_style: String,
    pub jersey_color: String,
    pub show_photos: bool,
    pub show_names: bool,
    pub show_numbers: bool,
    pub show_branding: bool,
    pub aspect_ratio: String,
    pub flipped_horizontal: bool,
    pub flipped_vertical: bool,
}

impl Default for LineupSettings {
    fn default() -> Self {
        Self {
            pitch_style: "grass".to_string(),
            jersey_color: "#ff0000".to_string(),
            show_photos: true,
            show_names: true,
            show_numbers: true,
            show_branding: false,
            aspect_ratio: "portrait".to_string(),
            flipped_horizontal: false,
            flipped_vertical: false,
        }
    }
}

/// Partial settings patch: only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub pitch_style: Option<String>,
    pub jersey_color: Option<String>,
    pub show_photos: Option<bool>,
    pub show_names: Option<bool>,
    pub show_numbers: Option<bool>,
    pub show_branding: Option<bool>,
    pub aspect_ratio: Option<String>,
    pub flipped_horizontal: Option<bool>,
    pub flipped_vertical: Option<bool>,
}

impl LineupSettings {
    /// Shallow-merge a patch into these settings. Values are not validated;
    /// rendering is expected to degrade gracefully on unknown styles.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.pitch_style {
            self.pitch_style = v;
        }
        if let Some(v) = update.jersey_color {
            self.jersey_color = v;
        }
        if let Some(v) = update.show_photos {
            self.show_photos = v;
        }
        if let Some(v) = update.show_names {
            self.show_names = v;
        }
        if let Some(v) = update.show_numbers {
            self.show_numbers = v;
        }
        if let Some(v) = update.show_branding {
            self.show_branding = v;
        }
        if let Some(v) = update.aspect_ratio {
            self.aspect_ratio = v;
        }
        if let Some(v) = update.flipped_horizontal {
            self.flipped_horizontal = v;
        }
        if let Some(v) = update.flipped_vertical {
            self.flipped_vertical = v;
        }
    }
}
