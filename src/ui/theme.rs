use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "tokyo-night";

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
    pub bg_light: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub border: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub warning: String,
}

impl Theme {
    /// User themes in `<config_dir>/cotype/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("cotype")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!(path = %user_theme_path.display(), %err, "ignoring broken theme")
                    }
                }
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1a1b26".to_string(),
            bg_light: "#24283b".to_string(),
            fg: "#a9b1d6".to_string(),
            text_correct: "#9ece6a".to_string(),
            text_incorrect: "#f7768e".to_string(),
            text_incorrect_bg: "#3b2232".to_string(),
            text_pending: "#565f89".to_string(),
            text_cursor_bg: "#7aa2f7".to_string(),
            text_cursor_fg: "#1a1b26".to_string(),
            accent: "#7aa2f7".to_string(),
            border: "#24283b".to_string(),
            bar_filled: "#7aa2f7".to_string(),
            bar_empty: "#24283b".to_string(),
            warning: "#e0af68".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn bg_light(&self) -> Color { Self::parse_color(&self.bg_light) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.iter().any(|n| n == DEFAULT_THEME));
        for name in names {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to load");
        }
    }

    #[test]
    fn test_default_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.colors.bg(), Color::Rgb(0x1a, 0x1b, 0x26));
    }

    #[test]
    fn test_parse_color_fallback() {
        assert_eq!(ThemeColors::parse_color("#7aa2f7"), Color::Rgb(0x7a, 0xa2, 0xf7));
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::load("does-not-exist").is_none());
    }
}
