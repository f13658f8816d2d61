use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::StatsOptions;
use crate::morse::CharClass;
use crate::paddle::TimingConfig;
use crate::session::FlashCardMode;

pub const MIN_MORSE_SPEED: u32 = 5;
pub const MAX_MORSE_SPEED: u32 = 60;
pub const MAX_TOAST_QUESTION_COUNT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_morse_speed")]
    pub morse_speed: u32,
    #[serde(default = "default_include_punctuation")]
    pub include_punctuation: bool,
    #[serde(default = "default_show_toast")]
    pub show_toast: bool,
    #[serde(default = "default_toast_question_count")]
    pub toast_question_count: u32,
    #[serde(default = "default_session_length")]
    pub session_length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paddle_dot_threshold_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paddle_dash_threshold_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paddle_tolerance_ms: Option<f64>,
    #[serde(default)]
    pub flash_card_mode: FlashCardMode,
    #[serde(default = "default_flash_card_include_alphabet")]
    pub flash_card_include_alphabet: bool,
    #[serde(default)]
    pub flash_card_include_digits: bool,
    #[serde(default)]
    pub flash_card_include_punctuation: bool,
    #[serde(default = "default_retention_months")]
    pub retention_months: u32,
    #[serde(default = "default_recent_attempt_limit")]
    pub recent_attempt_limit: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_morse_speed() -> u32 {
    12
}
fn default_include_punctuation() -> bool {
    true
}
fn default_show_toast() -> bool {
    true
}
fn default_toast_question_count() -> u32 {
    10
}
fn default_session_length() -> u32 {
    10
}
fn default_flash_card_include_alphabet() -> bool {
    true
}
fn default_retention_months() -> u32 {
    3
}
fn default_recent_attempt_limit() -> usize {
    1000
}
fn default_theme() -> String {
    "midnight".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            morse_speed: default_morse_speed(),
            include_punctuation: default_include_punctuation(),
            show_toast: default_show_toast(),
            toast_question_count: default_toast_question_count(),
            session_length: default_session_length(),
            paddle_dot_threshold_ms: None,
            paddle_dash_threshold_ms: None,
            paddle_tolerance_ms: None,
            flash_card_mode: FlashCardMode::default(),
            flash_card_include_alphabet: default_flash_card_include_alphabet(),
            flash_card_include_digits: false,
            flash_card_include_punctuation: false,
            retention_months: default_retention_months(),
            recent_attempt_limit: default_recent_attempt_limit(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.validate();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ditdah")
            .join("config.toml")
    }

    /// Pull hand-edited values back into range.
    pub fn validate(&mut self) {
        self.morse_speed = self.morse_speed.clamp(MIN_MORSE_SPEED, MAX_MORSE_SPEED);
        self.toast_question_count = self.toast_question_count.min(MAX_TOAST_QUESTION_COUNT);
        self.recent_attempt_limit = self.recent_attempt_limit.max(1);
        self.retention_months = self.retention_months.max(1);
    }

    /// Speed-derived thresholds with any explicit paddle override on top.
    pub fn timing(&self) -> TimingConfig {
        let mut timing = TimingConfig::from_wpm(self.morse_speed as f64);
        if let Some(ms) = self.paddle_dot_threshold_ms {
            timing.dot_threshold_ms = ms.max(1.0);
        }
        if let Some(ms) = self.paddle_dash_threshold_ms {
            timing.dash_threshold_ms = ms.max(1.0);
        }
        if let Some(ms) = self.paddle_tolerance_ms {
            timing.tolerance_ms = ms.max(1.0);
        }
        timing.sanitized()
    }

    pub fn stats_options(&self) -> StatsOptions {
        StatsOptions {
            retention_months: self.retention_months,
            recent_attempt_limit: self.recent_attempt_limit,
        }
    }

    pub fn flash_card_classes(&self) -> Vec<CharClass> {
        let mut classes = Vec::new();
        if self.flash_card_include_alphabet {
            classes.push(CharClass::Alphabet);
        }
        if self.flash_card_include_digits {
            classes.push(CharClass::Digits);
        }
        if self.flash_card_include_punctuation {
            classes.push(CharClass::Punctuation);
        }
        classes
    }
}
