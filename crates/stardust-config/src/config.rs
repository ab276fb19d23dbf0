//! Configuration structs with defaults and TOML loading.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use stardust_core::Theme;

use crate::error::ConfigError;

/// File name looked up inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest accepted cell dimension in surface pixels.
pub const MAX_CELL_PX: u32 = 64;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial theme name. `"dark"` is dark, anything else is light.
    pub theme: Theme,
    /// Target display refresh rate in frames per second.
    pub frame_rate: u32,
    /// Background layer settings.
    pub background: BackgroundConfig,
    /// Terminal cell geometry in surface pixels.
    pub cell: CellConfig,
    /// Random effect probabilities.
    pub effects: EffectsConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Background layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Draw the animated background at all.
    pub enabled: bool,
}

/// Size of one terminal cell in surface pixels.
///
/// The surface is sized like a browser viewport, so a terminal of
/// `cols x rows` cells becomes `cols * width_px` by `rows * height_px`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CellConfig {
    pub width_px: u32,
    pub height_px: u32,
}

/// Per-frame probabilities of the random effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    /// Chance per star per frame of a twinkle flash.
    pub twinkle_chance: f64,
    /// Chance per frame of a shooting star.
    pub shooting_star_chance: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (e.g. "info", "stardust_background=debug").
    pub level: String,
    /// Log file path. Defaults to `stardust.log` in the platform data dir.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            frame_rate: 60,
            background: BackgroundConfig::default(),
            cell: CellConfig::default(),
            effects: EffectsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width_px: 8,
            height_px: 16,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            twinkle_chance: 0.01,
            shooting_star_chance: 0.01,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Platform project directories for stardust.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "stardust")
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config from TOML text. Out-of-range values are sanitized.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents).map(Self::sanitized)
    }

    /// Pull every numeric setting back into its usable range.
    ///
    /// Chances outside `0.0..=1.0` are clamped and non-finite chances fall
    /// back to their default. Cell dimensions are kept in `1..=MAX_CELL_PX`.
    pub fn sanitized(mut self) -> Self {
        let defaults = EffectsConfig::default();
        self.effects.twinkle_chance =
            sanitize_chance("twinkle_chance", self.effects.twinkle_chance, defaults.twinkle_chance);
        self.effects.shooting_star_chance = sanitize_chance(
            "shooting_star_chance",
            self.effects.shooting_star_chance,
            defaults.shooting_star_chance,
        );
        self.cell.width_px = sanitize_cell_px("width_px", self.cell.width_px);
        self.cell.height_px = sanitize_cell_px("height_px", self.cell.height_px);
        self
    }

    /// Render the config as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Frame rate with a floor of one frame per second.
    pub fn effective_frame_rate(&self) -> u32 {
        self.frame_rate.max(1)
    }
}

fn sanitize_chance(name: &str, value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        tracing::warn!(setting = name, value, default, "chance is not finite, using default");
        return default;
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::warn!(setting = name, value, clamped, "chance out of range");
    }
    clamped
}

fn sanitize_cell_px(name: &str, value: u32) -> u32 {
    let clamped = value.clamp(1, MAX_CELL_PX);
    if clamped != value {
        tracing::warn!(setting = name, value, clamped, "cell size out of range");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.frame_rate, 60);
        assert!(config.background.enabled);
        assert_eq!(config.effects.twinkle_chance, 0.01);
        assert_eq!(config.effects.shooting_star_chance, 0.01);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("theme = \"dark\""));
        assert_eq!(Config::parse(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config = Config::parse("frame_rate = 30\n[cell]\nwidth_px = 10\n").unwrap();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.cell.width_px, 10);
        assert_eq!(config.cell.height_px, 16);
        assert_eq!(config.effects, EffectsConfig::default());
    }

    #[test]
    fn test_unknown_theme_is_light() {
        let config = Config::parse("theme = \"solarized\"").unwrap();
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_zero_frame_rate_is_clamped() {
        let config = Config::parse("frame_rate = 0").unwrap();
        assert_eq!(config.effective_frame_rate(), 1);
    }

    #[test]
    fn test_nan_chance_falls_back_to_default() {
        let config =
            Config::parse("[effects]\ntwinkle_chance = nan\nshooting_star_chance = inf\n").unwrap();
        assert_eq!(config.effects, EffectsConfig::default());
    }

    #[test]
    fn test_chance_out_of_range_is_clamped() {
        let config =
            Config::parse("[effects]\ntwinkle_chance = 3.5\nshooting_star_chance = -0.2\n").unwrap();
        assert_eq!(config.effects.twinkle_chance, 1.0);
        assert_eq!(config.effects.shooting_star_chance, 0.0);
    }

    #[test]
    fn test_oversized_cell_is_bounded() {
        let config = Config::parse("[cell]\nwidth_px = 100000\nheight_px = 0\n").unwrap();
        assert_eq!(config.cell.width_px, MAX_CELL_PX);
        assert_eq!(config.cell.height_px, 1);
    }

    #[test]
    fn test_load_sanitizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[effects]\ntwinkle_chance = nan\n[cell]\nwidth_px = 100000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.effects.twinkle_chance, 0.01);
        assert_eq!(config.cell.width_px, MAX_CELL_PX);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "theme = \"light\"\n[background]\nenabled = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.background.enabled);
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "frame_rate = \"fast\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
