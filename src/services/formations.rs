//! Built-in formation catalog.
//!
//! The catalog is seeded with a fixed set of named formations and never
//! mutated afterwards. Slot geometry lives on a normalized 0-100 plane;
//! flipped variants are derived on demand and never stored back.

use crate::models::{Formation, Position};

/// Read-only catalog of named formations, in a stable presentation order.
#[derive(Debug, Clone)]
pub struct FormationCatalog {
    formations: Vec<Formation>,
}

impl Default for FormationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FormationCatalog {
    pub fn new() -> Self {
        Self {
            formations: builtin_formations(),
        }
    }

    pub fn all(&self) -> &[Formation] {
        &self.formations
    }

    pub fn get(&self, id: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == id)
    }

    /// Formation with optional display-time coordinate flips applied.
    pub fn get_flipped(&self, id: &str, flip_h: bool, flip_v: bool) -> Option<Formation> {
        self.get(id).map(|f| {
            let mut result = f.clone();
            if flip_h {
                result = result.flip_horizontal();
            }
            if flip_v {
                result = result.flip_vertical();
            }
            result
        })
    }

    pub fn by_category(&self, category: &str) -> Vec<&Formation> {
        self.formations
            .iter()
            .filter(|f| f.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

fn builtin_formations() -> Vec<Formation> {
    vec![
        Formation::new(
            "4-3-3",
            "attacking",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lb", "LB", 15.0, 75.0),
                Position::new("lcb", "CB", 35.0, 78.0),
                Position::new("rcb", "CB", 65.0, 78.0),
                Position::new("rb", "RB", 85.0, 75.0),
                Position::new("lcm", "CM", 30.0, 55.0),
                Position::new("cm", "CM", 50.0, 50.0),
                Position::new("rcm", "CM", 70.0, 55.0),
                Position::new("lw", "LW", 15.0, 25.0),
                Position::new("st", "ST", 50.0, 18.0),
                Position::new("rw", "RW", 85.0, 25.0),
            ],
        ),
        Formation::new(
            "4-2-3-1",
            "balanced",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lb", "LB", 15.0, 75.0),
                Position::new("lcb", "CB", 35.0, 78.0),
                Position::new("rcb", "CB", 65.0, 78.0),
                Position::new("rb", "RB", 85.0, 75.0),
                Position::new("ldm", "CDM", 35.0, 58.0),
                Position::new("rdm", "CDM", 65.0, 58.0),
                Position::new("lam", "LAM", 20.0, 38.0),
                Position::new("cam", "CAM", 50.0, 35.0),
                Position::new("ram", "RAM", 80.0, 38.0),
                Position::new("st", "ST", 50.0, 18.0),
            ],
        ),
        Formation::new(
            "4-4-2",
            "balanced",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lb", "LB", 15.0, 75.0),
                Position::new("lcb", "CB", 35.0, 78.0),
                Position::new("rcb", "CB", 65.0, 78.0),
                Position::new("rb", "RB", 85.0, 75.0),
                Position::new("lm", "LM", 15.0, 50.0),
                Position::new("lcm", "CM", 35.0, 52.0),
                Position::new("rcm", "CM", 65.0, 52.0),
                Position::new("rm", "RM", 85.0, 50.0),
                Position::new("lst", "ST", 35.0, 20.0),
                Position::new("rst", "ST", 65.0, 20.0),
            ],
        ),
        Formation::new(
            "3-5-2",
            "balanced",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lcb", "CB", 25.0, 78.0),
                Position::new("cb", "CB", 50.0, 80.0),
                Position::new("rcb", "CB", 75.0, 78.0),
                Position::new("lwb", "LWB", 10.0, 55.0),
                Position::new("lcm", "CM", 30.0, 52.0),
                Position::new("cdm", "CDM", 50.0, 58.0),
                Position::new("rcm", "CM", 70.0, 52.0),
                Position::new("rwb", "RWB", 90.0, 55.0),
                Position::new("lst", "ST", 35.0, 20.0),
                Position::new("rst", "ST", 65.0, 20.0),
            ],
        ),
        Formation::new(
            "4-1-4-1",
            "defensive",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lb", "LB", 15.0, 75.0),
                Position::new("lcb", "CB", 35.0, 78.0),
                Position::new("rcb", "CB", 65.0, 78.0),
                Position::new("rb", "RB", 85.0, 75.0),
                Position::new("cdm", "CDM", 50.0, 60.0),
                Position::new("lm", "LM", 15.0, 42.0),
                Position::new("lcm", "CM", 35.0, 45.0),
                Position::new("rcm", "CM", 65.0, 45.0),
                Position::new("rm", "RM", 85.0, 42.0),
                Position::new("st", "ST", 50.0, 18.0),
            ],
        ),
        Formation::new(
            "5-3-2",
            "defensive",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lwb", "LWB", 10.0, 68.0),
                Position::new("lcb", "CB", 28.0, 78.0),
                Position::new("cb", "CB", 50.0, 80.0),
                Position::new("rcb", "CB", 72.0, 78.0),
                Position::new("rwb", "RWB", 90.0, 68.0),
                Position::new("lcm", "CM", 30.0, 50.0),
                Position::new("cm", "CM", 50.0, 48.0),
                Position::new("rcm", "CM", 70.0, 50.0),
                Position::new("lst", "ST", 35.0, 20.0),
                Position::new("rst", "ST", 65.0, 20.0),
            ],
        ),
        Formation::new(
            "4-3-1-2",
            "attacking",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lb", "LB", 15.0, 75.0),
                Position::new("lcb", "CB", 35.0, 78.0),
                Position::new("rcb", "CB", 65.0, 78.0),
                Position::new("rb", "RB", 85.0, 75.0),
                Position::new("lcm", "CM", 30.0, 55.0),
                Position::new("cdm", "CDM", 50.0, 60.0),
                Position::new("rcm", "CM", 70.0, 55.0),
                Position::new("cam", "CAM", 50.0, 38.0),
                Position::new("lst", "ST", 35.0, 20.0),
                Position::new("rst", "ST", 65.0, 20.0),
            ],
        ),
        Formation::new(
            "3-4-3",
            "attacking",
            vec![
                Position::new("gk", "GK", 50.0, 92.0),
                Position::new("lcb", "CB", 25.0, 78.0),
                Position::new("cb", "CB", 50.0, 80.0),
                Position::new("rcb", "CB", 75.0, 78.0),
                Position::new("lm", "LM", 15.0, 50.0),
                Position::new("lcm", "CM", 38.0, 52.0),
                Position::new("rcm", "CM", 62.0, 52.0),
                Position::new("rm", "RM", 85.0, 50.0),
                Position::new("lw", "LW", 20.0, 25.0),
                Position::new("st", "ST", 50.0, 18.0),
                Position::new("rw", "RW", 80.0, 25.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_formation_has_eleven_unique_slots() {
        let catalog = FormationCatalog::new();
        assert!(!catalog.all().is_empty());
        for formation in catalog.all() {
            assert_eq!(formation.positions.len(), 11, "{}", formation.id);
            let ids: HashSet<&str> =
                formation.positions.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids.len(), 11, "duplicate slot ids in {}", formation.id);
            for p in &formation.positions {
                assert!((0.0..=100.0).contains(&p.x), "{} x out of range", p.id);
                assert!((0.0..=100.0).contains(&p.y), "{} y out of range", p.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = FormationCatalog::new();
        assert_eq!(catalog.get("4-3-3").unwrap().category, "attacking");
        assert!(catalog.get("9-0-1").is_none());
    }

    #[test]
    fn flipped_lookup_applies_both_axes() {
        let catalog = FormationCatalog::new();
        let plain = catalog.get("4-3-3").unwrap().clone();
        let flipped = catalog.get_flipped("4-3-3", true, true).unwrap();
        let gk = plain.position("gk").unwrap();
        let gk_flipped = flipped.position("gk").unwrap();
        assert_eq!(gk_flipped.x, 100.0 - gk.x);
        assert_eq!(gk_flipped.y, 100.0 - gk.y);
        // no flips requested returns the original coordinates
        assert_eq!(catalog.get_flipped("4-3-3", false, false).unwrap(), plain);
        assert!(catalog.get_flipped("missing", true, false).is_none());
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let catalog = FormationCatalog::new();
        let attacking = catalog.by_category("ATTACKING");
        assert!(attacking.iter().any(|f| f.id == "4-3-3"));
        assert!(attacking.iter().all(|f| f.category == "attacking"));
        assert!(catalog.by_category("unknown").is_empty());
    }
}
