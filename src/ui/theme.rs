use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub tile_fg: String,
    pub tile_bg: String,
    pub tile_border: String,
    pub tile_used: String,
    pub slot_filled: String,
    pub slot_empty: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// Looks for `<name>.toml` in the user themes dir first, then among the
    /// bundled themes. A malformed user file is skipped with a warning and
    /// the bundled theme of the same name is tried next.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("stavr").join("themes").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => warn!("skipping malformed theme {}: {err}", user_path.display()),
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_dim: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            tile_fg: "#cdd6f4".to_string(),
            tile_bg: "#313244".to_string(),
            tile_border: "#6c7086".to_string(),
            tile_used: "#45475a".to_string(),
            slot_filled: "#f5e0dc".to_string(),
            slot_empty: "#585b70".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    /// Parses `#rrggbb` or the `#rgb` shorthand. Anything else renders white.
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Color::White;
        }
        let channels = match hex.len() {
            3 => (
                u8::from_str_radix(&hex[0..1], 16).map(|v| v * 0x11),
                u8::from_str_radix(&hex[1..2], 16).map(|v| v * 0x11),
                u8::from_str_radix(&hex[2..3], 16).map(|v| v * 0x11),
            ),
            6 => (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ),
            _ => return Color::White,
        };
        match channels {
            (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
            _ => Color::White,
        }
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_dim(&self) -> Color { Self::parse_color(&self.text_dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn tile_fg(&self) -> Color { Self::parse_color(&self.tile_fg) }
    pub fn tile_bg(&self) -> Color { Self::parse_color(&self.tile_bg) }
    pub fn tile_border(&self) -> Color { Self::parse_color(&self.tile_border) }
    pub fn tile_used(&self) -> Color { Self::parse_color(&self.tile_used) }
    pub fn slot_filled(&self) -> Color { Self::parse_color(&self.slot_filled) }
    pub fn slot_empty(&self) -> Color { Self::parse_color(&self.slot_empty) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
