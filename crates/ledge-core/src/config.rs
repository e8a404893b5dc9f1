use serde::{Deserialize, Serialize};

use crate::body::{Anchor, TILE_PIXELS, TileScale};
use crate::grid::PLATFORM;

/// Env var naming the level config file.
pub const CONFIG_ENV: &str = "LEDGE_LEVEL_CONFIG";
/// Config path used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/level.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How levels are merged and laid out, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Symbol merged into platform hitboxes.
    pub designator: char,
    pub tile_width: f32,
    pub tile_height: f32,
    pub anchor: Anchor,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            designator: PLATFORM,
            tile_width: TILE_PIXELS,
            tile_height: TILE_PIXELS,
            anchor: Anchor::default(),
        }
    }
}

impl LevelConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.tile_width) || !positive(self.tile_height) {
            return Err(ConfigError::Parse(format!(
                "tile size must be positive, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }

    pub fn scale(&self) -> TileScale {
        TileScale {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
        }
    }
}
