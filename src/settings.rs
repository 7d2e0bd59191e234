//! Game settings
//!
//! Everything the simulation reads at runtime. Loaded from JSON with
//! per-field defaults, validated before a game starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Footprint;

/// How a cut offset is rounded before slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OffsetRounding {
    /// Floor toward negative infinity
    #[default]
    Floor,
    /// Keep the fractional offset
    Raw,
}

impl OffsetRounding {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetRounding::Floor => "floor",
            OffsetRounding::Raw => "raw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "floor" | "truncate" => Some(OffsetRounding::Floor),
            "raw" | "exact" => Some(OffsetRounding::Raw),
            _ => None,
        }
    }

    /// Apply the rounding to a raw offset
    #[inline]
    pub fn apply(&self, offset: f32) -> f32 {
        match self {
            OffsetRounding::Floor => offset.floor(),
            OffsetRounding::Raw => offset,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Slide speed of the moving block (units/s), adjustable mid-game
    pub block_speed: f32,
    /// Loss threshold on the moving axis
    pub play_boundary: f32,
    /// How far back from center a block spawns
    pub spawn_distance: f32,
    /// Height of one layer
    pub layer_thickness: f32,
    /// Footprint of the base block
    pub base_footprint: Footprint,
    /// Seconds a falling piece takes to drop one layer
    pub fall_duration: f32,
    pub offset_rounding: OffsetRounding,
    /// Seed for block tints
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_speed: BLOCK_SPEED,
            play_boundary: PLAY_BOUNDARY,
            spawn_distance: SPAWN_DISTANCE,
            layer_thickness: LAYER_THICKNESS,
            base_footprint: Footprint::new(BASE_WIDTH, BASE_DEPTH),
            fall_duration: FALL_DURATION,
            offset_rounding: OffsetRounding::Floor,
            seed: 0,
        }
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

impl Settings {
    /// Check every numeric setting is usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive("block_speed", self.block_speed)?;
        check_positive("play_boundary", self.play_boundary)?;
        check_positive("spawn_distance", self.spawn_distance)?;
        check_positive("layer_thickness", self.layer_thickness)?;
        check_positive("base_footprint.width", self.base_footprint.width)?;
        check_positive("base_footprint.depth", self.base_footprint.depth)?;
        check_positive("fall_duration", self.fall_duration)?;
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults if it doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Change block speed, rejecting non-positive values
    pub fn set_block_speed(&mut self, speed: f32) -> Result<(), SettingsError> {
        check_positive("block_speed", speed)?;
        self.block_speed = speed;
        Ok(())
    }
}
