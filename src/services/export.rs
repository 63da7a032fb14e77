//! Lineup export: dimension resolution and server-side SVG rendering.
//!
//! The frontend renders its own PNG/JPEG client-side; the backend validates
//! the request, answers with the pixel dimensions to render at, and can
//! produce a standalone SVG artifact for download. Export never mutates any
//! lineup state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{LineupPlayer, LineupSettings};

/// Base export width in pixels; height follows from the aspect ratio.
pub const BASE_EXPORT_WIDTH: u32 = 1080;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no players in lineup")]
    EmptyLineup,
}

/// Export request as posted by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub formation_id: String,
    #[serde(default)]
    pub players: Vec<LineupPlayer>,
    #[serde(default)]
    pub settings: LineupSettings,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

fn default_format() -> String {
    "png".to_string()
}

fn default_width() -> u32 {
    BASE_EXPORT_WIDTH
}

/// Resolved sizing for a client-side render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Pixel dimensions for an aspect ratio. Unknown ratios fall back to
/// portrait.
pub fn export_dimensions(aspect_ratio: &str) -> (u32, u32) {
    let width = BASE_EXPORT_WIDTH;
    let height = match aspect_ratio {
        "square" => width,
        "landscape" => (width as f64 * 0.75) as u32,
        _ => (width as f64 * 1.25) as u32,
    };
    (width, height)
}

/// Validate an export request and resolve its final dimensions.
pub fn prepare_export(request: &ExportRequest) -> Result<ExportMetadata, ExportError> {
    if request.players.is_empty() {
        return Err(ExportError::EmptyLineup);
    }

    let width = if request.width == 0 {
        BASE_EXPORT_WIDTH
    } else {
        request.width
    };
    let height = match request.settings.aspect_ratio.as_str() {
        "square" => width,
        "landscape" => (width as f64 * 0.75) as u32,
        "portrait" => (width as f64 * 1.25) as u32,
        _ if request.height > 0 => request.height,
        _ => (width as f64 * 1.25) as u32,
    };

    Ok(ExportMetadata {
        width,
        height,
        format: request.format.clone(),
    })
}

/// Render the lineup as a standalone SVG document.
pub fn render_svg(request: &ExportRequest) -> String {
    let (width, height) = match prepare_export(request) {
        Ok(meta) => (meta.width, meta.height),
        Err(_) => export_dimensions(&request.settings.aspect_ratio),
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">",
        w = width,
        h = height
    ));

    let bg_color = match request.settings.pitch_style.as_str() {
        "dark" => "#1a472a",
        "light" => "#4a8f4a",
        "minimal" => "#2d5a2d",
        // unknown styles degrade to the default grass treatment
        _ => "#2e7d32",
    };
    svg.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        width, height, bg_color
    ));
    svg.push_str(&pitch_markings(width, height));

    for player in &request.players {
        let x = player.custom_x.unwrap_or(50.0);
        let y = player.custom_y.unwrap_or(50.0);
        let px = (x * width as f64 / 100.0) as i64;
        let py = (y * height as f64 / 100.0) as i64;

        let color = player
            .jersey_color
            .as_deref()
            .unwrap_or(&request.settings.jersey_color);

        svg.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"25\" fill=\"{}\" stroke=\"white\" stroke-width=\"2\"/>",
            px, py, color
        ));

        if request.settings.show_names {
            let name = player.display_name.as_deref().unwrap_or(&player.name);
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"white\" font-size=\"12\" font-family=\"Arial\">{}</text>",
                px,
                py + 40,
                escape_xml(name)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn pitch_markings(width: u32, height: u32) -> String {
    let stroke = "rgba(255,255,255,0.6)";
    let stroke_width = 2;
    let padding = 20;
    let mut markings = String::new();

    markings.push_str(&format!(
        "<rect x=\"{p}\" y=\"{p}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        width - 2 * padding,
        height - 2 * padding,
        stroke,
        stroke_width,
        p = padding
    ));

    let center_y = height / 2;
    markings.push_str(&format!(
        "<line x1=\"{}\" y1=\"{cy}\" x2=\"{}\" y2=\"{cy}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        padding,
        width - padding,
        stroke,
        stroke_width,
        cy = center_y
    ));

    let circle_radius = width.min(height) / 8;
    markings.push_str(&format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        circle_radius,
        stroke,
        stroke_width,
        cx = width / 2,
        cy = center_y
    ));
    markings.push_str(&format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{}\"/>",
        width / 2,
        center_y,
        stroke
    ));

    let penalty_width = width / 3;
    let penalty_height = height / 6;
    markings.push_str(&format!(
        "<rect x=\"{x}\" y=\"{}\" width=\"{pw}\" height=\"{ph}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        padding,
        stroke,
        stroke_width,
        x = (width - penalty_width) / 2,
        pw = penalty_width,
        ph = penalty_height
    ));
    markings.push_str(&format!(
        "<rect x=\"{x}\" y=\"{}\" width=\"{pw}\" height=\"{ph}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        height - padding - penalty_height,
        stroke,
        stroke_width,
        x = (width - penalty_width) / 2,
        pw = penalty_width,
        ph = penalty_height
    ));

    markings
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_player(id: &str, name: &str, x: f64, y: f64) -> LineupPlayer {
        LineupPlayer {
            player_id: id.to_string(),
            position_id: Some("st".to_string()),
            name: name.to_string(),
            display_name: None,
            photo_url: None,
            number: None,
            custom_x: Some(x),
            custom_y: Some(y),
            jersey_color: None,
        }
    }

    fn request(players: Vec<LineupPlayer>) -> ExportRequest {
        ExportRequest {
            formation_id: "4-3-3".to_string(),
            players,
            settings: LineupSettings::default(),
            format: "png".to_string(),
            width: 1080,
            height: 0,
        }
    }

    #[test]
    fn dimensions_per_aspect_ratio() {
        assert_eq!(export_dimensions("square"), (1080, 1080));
        assert_eq!(export_dimensions("portrait"), (1080, 1350));
        assert_eq!(export_dimensions("landscape"), (1080, 810));
        // unknown ratios fall back to portrait
        assert_eq!(export_dimensions("cinema"), (1080, 1350));
    }

    #[test]
    fn prepare_rejects_empty_lineup() {
        let req = request(vec![]);
        assert!(matches!(
            prepare_export(&req),
            Err(ExportError::EmptyLineup)
        ));
    }

    #[test]
    fn prepare_resolves_height_from_settings() {
        let mut req = request(vec![placed_player("a", "A", 50.0, 18.0)]);
        req.settings.aspect_ratio = "square".to_string();
        let meta = prepare_export(&req).unwrap();
        assert_eq!(meta.width, 1080);
        assert_eq!(meta.height, 1080);
        assert_eq!(meta.format, "png");
    }

    #[test]
    fn svg_contains_players_and_markings() {
        let req = request(vec![placed_player("a", "Haaland", 50.0, 18.0)]);
        let svg = render_svg(&req);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 1080 1350\""));
        assert!(svg.contains("Haaland"));
        // background + center spot + player circle at least
        assert!(svg.matches("<circle").count() >= 3);
    }

    #[test]
    fn svg_escapes_player_names() {
        let req = request(vec![placed_player("a", "A & B <C>", 50.0, 18.0)]);
        let svg = render_svg(&req);
        assert!(svg.contains("A &amp; B &lt;C&gt;"));
        assert!(!svg.contains("A & B"));
    }

    #[test]
    fn svg_respects_show_names_and_jersey_override() {
        let mut player = placed_player("a", "Haaland", 50.0, 18.0);
        player.jersey_color = Some("#00ff00".to_string());
        let mut req = request(vec![player]);
        req.settings.show_names = false;
        req.settings.jersey_color = "#123456".to_string();
        let svg = render_svg(&req);
        assert!(!svg.contains("Haaland"));
        assert!(svg.contains("#00ff00"));
        assert!(!svg.contains("fill=\"#123456\""));
    }
}
