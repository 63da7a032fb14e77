//! Formation and position types.
//!
//! A formation is a named, ordered set of exactly eleven positions on a
//! normalized pitch plane: both axes run 0-100, with y = 0 at the attacking
//! end and y = 100 at the own goal line. Flips are pure transforms applied
//! at display time and are never written back into the catalog.

use serde::{Deserialize, Serialize};

/// A single slot within a formation where one player may stand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Stable identifier, unique within a formation (e.g. "lcb").
    pub id: String,
    /// Short display label (e.g. "CB", "ST").
    pub label: String,
    /// Horizontal coordinate in [0, 100].
    pub x: f64,
    /// Vertical coordinate in [0, 100].
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Position {
    pub fn new(id: &str, label: &str, x: f64, y: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            x,
            y,
            role: None,
        }
    }

    /// Mirror across the vertical axis (x -> 100 - x).
    pub fn flipped_horizontal(&self) -> Self {
        Self {
            x: 100.0 - self.x,
            ..self.clone()
        }
    }

    /// Mirror across the horizontal axis (y -> 100 - y).
    pub fn flipped_vertical(&self) -> Self {
        Self {
            y: 100.0 - self.y,
            ..self.clone()
        }
    }

    pub fn flipped_both(&self) -> Self {
        self.flipped_horizontal().flipped_vertical()
    }
}

/// A named tactical shape: an ordered sequence of eleven positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub positions: Vec<Position>,
    pub category: String,
}

impl Formation {
    pub fn new(id: &str, category: &str, positions: Vec<Position>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            display_name: id.to_string(),
            positions,
            category: category.to_string(),
        }
    }

    pub fn flip_horizontal(&self) -> Self {
        Self {
            positions: self.positions.iter().map(Position::flipped_horizontal).collect(),
            ..self.clone()
        }
    }

    pub fn flip_vertical(&self) -> Self {
        Self {
            positions: self.positions.iter().map(Position::flipped_vertical).collect(),
            ..self.clone()
        }
    }

    /// Look up a position by slot id.
    pub fn position(&self, position_id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == position_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gk() -> Position {
        Position::new("gk", "GK", 50.0, 92.0)
    }

    #[test]
    fn flip_horizontal_mirrors_x() {
        let p = Position::new("lb", "LB", 15.0, 75.0);
        let flipped = p.flipped_horizontal();
        assert_eq!(flipped.x, 85.0);
        assert_eq!(flipped.y, 75.0);
        assert_eq!(flipped.id, "lb");
    }

    #[test]
    fn flip_is_idempotent_when_applied_twice() {
        let p = Position::new("rw", "RW", 85.0, 25.0);
        assert_eq!(p.flipped_horizontal().flipped_horizontal(), p);
        assert_eq!(p.flipped_vertical().flipped_vertical(), p);
        assert_eq!(p.flipped_both().flipped_both(), p);
    }

    #[test]
    fn formation_flip_does_not_mutate_original() {
        let f = Formation::new("test", "balanced", vec![gk()]);
        let flipped = f.flip_vertical();
        assert_eq!(f.positions[0].y, 92.0);
        assert_eq!(flipped.positions[0].y, 8.0);
    }

    #[test]
    fn position_lookup_by_id() {
        let f = Formation::new(
            "test",
            "balanced",
            vec![gk(), Position::new("st", "ST", 50.0, 18.0)],
        );
        assert_eq!(f.position("st").unwrap().label, "ST");
        assert!(f.position("missing").is_none());
    }
}
