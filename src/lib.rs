//! Stack Slice - A slide-and-cut block stacking game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (slicing, round lifecycle, falling pieces)
//! - `policy`: Sources of the "cut requested" signal (manual, auto-cut)
//! - `settings`: Validated runtime configuration

pub mod policy;
pub mod settings;
pub mod sim;

pub use policy::{AutoCut, CutPolicy, ManualCut};
pub use settings::{OffsetRounding, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Frame timestep used by the headless driver (60 Hz display cadence)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Vertical thickness of one stack layer
    pub const LAYER_THICKNESS: f32 = 4.0;

    /// Base block footprint (width along X, depth along Z)
    pub const BASE_WIDTH: f32 = 30.0;
    pub const BASE_DEPTH: f32 = 30.0;

    /// Moving block loses once its coordinate passes this (relative to center)
    pub const PLAY_BOUNDARY: f32 = 60.0;
    /// Distance from center at which a new block spawns (half play span + base extent)
    pub const SPAWN_DISTANCE: f32 = 60.0;

    /// Block slide speed (units/s)
    pub const BLOCK_SPEED: f32 = 50.0;

    /// Duration of a falling piece's one-layer drop (seconds)
    pub const FALL_DURATION: f32 = 1.0;

    /// Tint of the base block (RGB, 0-1)
    pub const BASE_TINT: [f32; 3] = [0.0, 1.0, 0.0];
}
