use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use ditdah::paddle::TimingZone;

const BUILTIN_THEMES: &[(&str, &str)] = &[
    (
        "midnight",
        r##"
name = "midnight"
[colors]
bg = "#1e1e2e"
fg = "#cdd6f4"
muted = "#585b70"
accent = "#89b4fa"
border = "#45475a"
header_bg = "#313244"
header_fg = "#cdd6f4"
dot = "#94e2d5"
dash = "#f9e2af"
invalid = "#f38ba8"
bar_empty = "#313244"
lamp_on = "#f9e2af"
error = "#f38ba8"
warning = "#fab387"
success = "#a6e3a1"
"##,
    ),
    (
        "paper",
        r##"
name = "paper"
[colors]
bg = "#eff1f5"
fg = "#4c4f69"
muted = "#9ca0b0"
accent = "#1e66f5"
border = "#bcc0cc"
header_bg = "#dce0e8"
header_fg = "#4c4f69"
dot = "#179299"
dash = "#df8e1d"
invalid = "#d20f39"
bar_empty = "#ccd0da"
lamp_on = "#df8e1d"
error = "#d20f39"
warning = "#fe640b"
success = "#40a02b"
"##,
    ),
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub dot: String,
    pub dash: String,
    pub invalid: String,
    pub bar_empty: String,
    pub lamp_on: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in `<config_dir>/ditdah/themes/<name>.toml` shadow the
    /// built-in ones.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("ditdah").join("themes").join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("ignoring theme file {}: {e}", path.display()),
                }
            }
        }

        BUILTIN_THEMES
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, content)| toml::from_str::<Theme>(content).ok())
    }

    pub fn available_themes() -> Vec<String> {
        BUILTIN_THEMES.iter().map(|(n, _)| n.to_string()).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("midnight").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#000000".to_string(),
            fg: "#ffffff".to_string(),
            muted: "#808080".to_string(),
            accent: "#00afff".to_string(),
            border: "#808080".to_string(),
            header_bg: "#303030".to_string(),
            header_fg: "#ffffff".to_string(),
            dot: "#00d7af".to_string(),
            dash: "#ffd700".to_string(),
            invalid: "#ff5f5f".to_string(),
            bar_empty: "#303030".to_string(),
            lamp_on: "#ffd700".to_string(),
            error: "#ff5f5f".to_string(),
            warning: "#ffaf00".to_string(),
            success: "#5fd75f".to_string(),
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
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn dot(&self) -> Color { Self::parse_color(&self.dot) }
    pub fn dash(&self) -> Color { Self::parse_color(&self.dash) }
    pub fn invalid(&self) -> Color { Self::parse_color(&self.invalid) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn lamp_on(&self) -> Color { Self::parse_color(&self.lamp_on) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }

    pub fn zone(&self, zone: TimingZone) -> Color {
        match zone {
            TimingZone::Dot => self.dot(),
            TimingZone::Dash => self.dash(),
            TimingZone::Invalid => self.invalid(),
        }
    }
}
