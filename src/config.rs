use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::import::{DEFAULT_LINE_LIMIT, DEFAULT_PASTE_LIMIT};
use crate::generator::practice::{DEFAULT_KEY_COUNT, DEFAULT_LINE_COUNT, DEFAULT_LINE_WIDTH};
use crate::mode::Mode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub default_mode: Mode,
    #[serde(default = "default_prose_width")]
    pub prose_width: usize,
    #[serde(default = "default_paste_limit")]
    pub paste_limit: usize,
    #[serde(default = "default_fetch_line_limit")]
    pub fetch_line_limit: usize,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_practice_line_width")]
    pub practice_line_width: usize,
    #[serde(default = "default_practice_lines")]
    pub practice_lines: usize,
    #[serde(default = "default_practice_key_count")]
    pub practice_key_count: usize,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_theme() -> String {
    "tokyo-night".to_string()
}
fn default_prose_width() -> usize {
    76
}
fn default_paste_limit() -> usize {
    DEFAULT_PASTE_LIMIT
}
fn default_fetch_line_limit() -> usize {
    DEFAULT_LINE_LIMIT
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_practice_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}
fn default_practice_lines() -> usize {
    DEFAULT_LINE_COUNT
}
fn default_practice_key_count() -> usize {
    DEFAULT_KEY_COUNT
}
fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_mode: Mode::default(),
            prose_width: default_prose_width(),
            paste_limit: default_paste_limit(),
            fetch_line_limit: default_fetch_line_limit(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            practice_line_width: default_practice_line_width(),
            practice_lines: default_practice_lines(),
            practice_key_count: default_practice_key_count(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
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
            .join("cotype")
            .join("config.toml")
    }

    /// Pull hand-edited values back into a usable range.
    pub fn normalize(&mut self) {
        self.prose_width = self.prose_width.clamp(20, 400);
        self.paste_limit = self.paste_limit.max(1);
        self.fetch_line_limit = self.fetch_line_limit.max(1);
        self.fetch_timeout_secs = self.fetch_timeout_secs.clamp(1, 120);
        self.practice_line_width = self.practice_line_width.clamp(2, 400);
        self.practice_lines = self.practice_lines.clamp(1, 50);
        self.practice_key_count = self.practice_key_count.clamp(1, 50);
        self.tick_rate_ms = self.tick_rate_ms.clamp(16, 1000);
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}
