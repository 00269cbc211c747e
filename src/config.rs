//! Editor configuration stored as RON
//!
//! ```ron
//! (
//!   sheet_width: 128,
//!   sheet_height: 128,
//!   tile_size: 8,
//!   zoom: 4,
//! )
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::DEFAULT_TILE_SIZE;
use crate::tiles::{TileGrid, SHEET_SIZE};

/// Largest allowed display zoom
pub const MAX_ZOOM: u32 = 32;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Sheet and display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Sprite sheet width in pixels
    pub sheet_width: usize,
    /// Sprite sheet height in pixels
    pub sheet_height: usize,
    /// Initial tile edge in pixels
    pub tile_size: usize,
    /// Screen pixels per sheet pixel in the viewer
    pub zoom: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sheet_width: SHEET_SIZE,
            sheet_height: SHEET_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            zoom: 4,
        }
    }
}

impl EditorConfig {
    /// Load from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from a file, falling back to defaults if it is missing or bad
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        self.validate()?;
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet_width == 0 || self.sheet_height == 0 {
            return Err(ConfigError::Validation(format!(
                "invalid sheet size {}x{}",
                self.sheet_width, self.sheet_height
            )));
        }
        if self.tile_size == 0
            || self.tile_size > self.sheet_width
            || self.tile_size > self.sheet_height
        {
            return Err(ConfigError::Validation(format!(
                "tile size {} does not fit a {}x{} sheet",
                self.tile_size, self.sheet_width, self.sheet_height
            )));
        }
        if self.zoom == 0 || self.zoom > MAX_ZOOM {
            return Err(ConfigError::Validation(format!(
                "zoom {} out of range 1..={}",
                self.zoom, MAX_ZOOM
            )));
        }
        Ok(())
    }

    /// Empty sheet of the configured size
    pub fn tile_grid(&self) -> Result<TileGrid, ConfigError> {
        TileGrid::with_size(self.sheet_width, self.sheet_height)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}
