//! User configuration — animation defaults and demo pacing.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-reveal/config.toml` (default
//! `~/.config/scroll-reveal/config.toml`).  Command-line flags override
//! whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use crate::core::{error::ConfigError, progress::AnimationConfig};

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub start_offset: f64,
    pub end_offset: f64,
    /// Document-scroll window.  Both ends must be set for it to apply.
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub transition_ms: u64,
    /// Redraw cadence of the terminal demo.
    pub frame_ms: u64,
    /// Rows scrolled per wheel notch / arrow key.
    pub scroll_step: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_offset: AnimationConfig::DEFAULT_START_OFFSET,
            end_offset: AnimationConfig::DEFAULT_END_OFFSET,
            min_threshold: None,
            max_threshold: None,
            transition_ms: AnimationConfig::DEFAULT_TRANSITION_MS,
            frame_ms: 16,
            scroll_step: 1,
        }
    }
}

impl AppConfig {
    /// Build the per-instance animation config from these settings.
    pub fn animation(&self) -> Result<AnimationConfig, ConfigError> {
        let config = AnimationConfig::new(self.start_offset, self.end_offset)?
            .with_transition_ms(self.transition_ms);
        match (self.min_threshold, self.max_threshold) {
            (Some(min), Some(max)) => config.with_thresholds(min, max),
            (None, None) => Ok(config),
            (Some(min), None) => config.with_thresholds(min, 1.0),
            (None, Some(max)) => config.with_thresholds(0.0, max),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk and return where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Parse the key-value format.  Unknown keys, comments and section
    /// headers are skipped; malformed values keep their default.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let ok = match key {
                "start_offset" => parse_fraction(value).map(|v| config.start_offset = v),
                "end_offset" => parse_fraction(value).map(|v| config.end_offset = v),
                "min_threshold" => parse_fraction(value).map(|v| config.min_threshold = Some(v)),
                "max_threshold" => parse_fraction(value).map(|v| config.max_threshold = Some(v)),
                "transition_ms" => value.parse().ok().map(|v| config.transition_ms = v),
                "frame_ms" => value
                    .parse::<u64>()
                    .ok()
                    // Keep this bounded so the demo stays responsive.
                    .map(|v| config.frame_ms = v.clamp(4, 250)),
                "scroll_step" => value
                    .parse::<u16>()
                    .ok()
                    .map(|v| config.scroll_step = v.max(1)),
                _ => continue,
            };
            if ok.is_none() {
                warn!(key, value, "ignoring invalid config value");
            }
        }

        if let (Some(min), Some(max)) = (config.min_threshold, config.max_threshold) {
            if min > max {
                warn!(min, max, "min_threshold exceeds max_threshold, dropping window");
                config.min_threshold = None;
                config.max_threshold = None;
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scroll-reveal configuration".to_string(),
            String::new(),
            "# Animation".to_string(),
            format!("start_offset = {}", self.start_offset),
            format!("end_offset = {}", self.end_offset),
        ];
        if let Some(min) = self.min_threshold {
            lines.push(format!("min_threshold = {min}"));
        }
        if let Some(max) = self.max_threshold {
            lines.push(format!("max_threshold = {max}"));
        }
        lines.extend([
            format!("transition_ms = {}", self.transition_ms),
            String::new(),
            "# Demo".to_string(),
            format!("frame_ms = {}", self.frame_ms),
            format!("scroll_step = {}", self.scroll_step),
            String::new(),
        ]);
        lines.join("\n")
    }
}

fn parse_fraction(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-reveal/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-reveal").join("config.toml")
}
