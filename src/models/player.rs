//! Player records as produced by the scraper pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A searchable player record. Instances come either from scraper output
/// JSON on disk or from an on-demand scrape of a club squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl Player {
    /// Fill in fields the scraper may omit: a generated id and a display
    /// name derived from the full name.
    pub fn normalized(mut self) -> Self {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.display_name.is_none() {
            self.display_name = Some(format_display_name(&self.name));
        }
        self
    }

    /// Display name with fallback to the full name.
    pub fn display_name_or_full(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Derive a short display name from a full name: the last whitespace-separated
/// token, truncated with a trailing dot when longer than 12 characters.
pub fn format_display_name(full_name: &str) -> String {
    let mut parts = full_name.split_whitespace();
    let Some(first) = parts.next() else {
        return String::new();
    };
    let last = parts.last().unwrap_or(first);
    if last.chars().count() > 12 {
        let truncated: String = last.chars().take(11).collect();
        format!("{}.", truncated)
    } else {
        last.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_last_token() {
        assert_eq!(format_display_name("Erling Haaland"), "Haaland");
        assert_eq!(format_display_name("Kevin De Bruyne"), "Bruyne");
    }

    #[test]
    fn display_name_single_token() {
        assert_eq!(format_display_name("Rodri"), "Rodri");
    }

    #[test]
    fn display_name_truncates_long_surnames() {
        assert_eq!(
            format_display_name("Jan Oblakkovichenkoson"),
            "Oblakkovich."
        );
    }

    #[test]
    fn display_name_blank_input() {
        assert_eq!(format_display_name(""), "");
        assert_eq!(format_display_name("   "), "");
    }

    #[test]
    fn normalized_fills_missing_fields() {
        let p = Player {
            id: String::new(),
            name: "Bukayo Saka".to_string(),
            display_name: None,
            positions: vec!["RW".to_string()],
            club: None,
            nationality: None,
            league: None,
            photo_url: None,
            number: Some(7),
        }
        .normalized();
        assert!(!p.id.is_empty());
        assert_eq!(p.display_name.as_deref(), Some("Saka"));
    }

    #[test]
    fn normalized_keeps_existing_fields() {
        let p = Player {
            id: "p1".to_string(),
            name: "Bukayo Saka".to_string(),
            display_name: Some("Saka7".to_string()),
            positions: vec![],
            club: None,
            nationality: None,
            league: None,
            photo_url: None,
            number: None,
        }
        .normalized();
        assert_eq!(p.id, "p1");
        assert_eq!(p.display_name.as_deref(), Some("Saka7"));
    }
}
