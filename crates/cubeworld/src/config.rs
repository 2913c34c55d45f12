//! # World Configuration
//!
//! Loaded from TOML. Every field has a default, so a file only needs the
//! keys it changes:
//!
//! ```toml
//! render_distance = 8
//!
//! [terrain]
//! seed = 42
//! water_level = 60
//! ```
//!
//! Out-of-range values are clamped by [`WorldConfig::sanitized`], never
//! rejected.

use std::fs;
use std::path::Path;

use cubeworld_procedural::TerrainParameters;
use cubeworld_shared::{DEFAULT_RENDER_DISTANCE, MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE};
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// Named render distances offered to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderDistancePreset {
    /// 4 chunks.
    Tiny,
    /// 8 chunks.
    Short,
    /// 12 chunks.
    Normal,
    /// 16 chunks.
    Far,
    /// 24 chunks.
    Extreme,
    /// 32 chunks.
    Maximum,
}

impl RenderDistancePreset {
    /// Every preset, nearest first.
    pub const ALL: [Self; 6] = [
        Self::Tiny,
        Self::Short,
        Self::Normal,
        Self::Far,
        Self::Extreme,
        Self::Maximum,
    ];

    /// Render distance in chunks.
    #[must_use]
    pub const fn chunks(self) -> u32 {
        match self {
            Self::Tiny => 4,
            Self::Short => 8,
            Self::Normal => 12,
            Self::Far => 16,
            Self::Extreme => 24,
            Self::Maximum => 32,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny",
            Self::Short => "Short",
            Self::Normal => "Normal",
            Self::Far => "Far",
            Self::Extreme => "Extreme",
            Self::Maximum => "Maximum",
        }
    }
}

/// Everything needed to construct a [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Streaming radius in chunks, clamped to `[2, 32]`.
    pub render_distance: u32,
    /// Terrain generator parameters.
    pub terrain: TerrainParameters,
}

impl WorldConfig {
    /// Default configuration using a preset render distance.
    #[must_use]
    pub fn with_preset(preset: RenderDistancePreset) -> Self {
        Self {
            render_distance: preset.chunks(),
            ..Self::default()
        }
    }

    /// Parses a TOML document. The result is sanitized.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ConfigParse`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        let parsed: Self = toml::from_str(text)?;
        Ok(parsed.sanitized())
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ConfigIo`] when the file cannot be read and
    /// [`WorldError::ConfigParse`] when its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the sanitized configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ConfigSerialize`] if serialization fails.
    pub fn to_toml_string(&self) -> WorldResult<String> {
        Ok(toml::to_string_pretty(&self.sanitized())?)
    }

    /// Writes the sanitized configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ConfigIo`] when the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> WorldResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| WorldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Copy with every field forced into its valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            render_distance: self.render_distance.clamp(MIN_RENDER_DISTANCE, MAX_RENDER_DISTANCE),
            terrain: self.terrain.sanitized(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            render_distance: DEFAULT_RENDER_DISTANCE,
            terrain: TerrainParameters::default(),
        }
    }
}
