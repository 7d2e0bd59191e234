//! Block footprints and the sliding block of the current round

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::axis::{Axis, axis_for};
use crate::settings::Settings;

/// Horizontal extent of a block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
}

impl Footprint {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    /// Extent along the given axis
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    /// Copy with the extent along `axis` replaced
    #[inline]
    pub fn with_extent(self, axis: Axis, extent: f32) -> Self {
        match axis {
            Axis::X => Self {
                width: extent,
                ..self
            },
            Axis::Z => Self {
                depth: extent,
                ..self
            },
        }
    }

    /// Both extents strictly positive
    pub fn is_solid(&self) -> bool {
        self.width > 0.0 && self.depth > 0.0
    }
}

/// The block sliding across the stack this round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBlock {
    /// Round that spawned this block
    pub round: u32,
    /// Axis of travel
    pub axis: Axis,
    pub footprint: Footprint,
    pub pos: Vec3,
    /// Display tint (RGB, 0-1)
    pub tint: [f32; 3],
}

impl MovingBlock {
    /// Spawn a block far on the negative side of the stack
    ///
    /// The block copies the stack footprint, sits on the round's layer, lines
    /// up with the stack center off-axis and starts `spawn_distance` back on
    /// its axis so it has to cross the center to be cut.
    pub fn spawn(
        round: u32,
        stack_footprint: Footprint,
        stack_center: Vec2,
        settings: &Settings,
        tint: [f32; 3],
    ) -> Self {
        let axis = axis_for(round);
        let off_axis = axis.other();

        let mut pos = Vec3::new(0.0, round as f32 * settings.layer_thickness, 0.0);
        off_axis.set(&mut pos, off_axis.of_plane(stack_center));
        axis.set(
            &mut pos,
            -settings.spawn_distance - axis.of_plane(stack_center),
        );

        Self {
            round,
            axis,
            footprint: stack_footprint,
            pos,
            tint,
        }
    }

    /// Slide along the axis of travel
    #[inline]
    pub fn advance(&mut self, elapsed: f32, speed: f32) {
        let along = self.axis.of(self.pos) + elapsed * speed;
        self.axis.set(&mut self.pos, along);
    }

    /// Moving coordinate relative to the stack center
    #[inline]
    pub fn offset_from(&self, stack_center: Vec2) -> f32 {
        self.axis.of(self.pos) - self.axis.of_plane(stack_center)
    }

    /// Whether the block slid past the play boundary
    pub fn has_overshot(&self, boundary: f32, stack_center: Vec2) -> bool {
        self.axis.of(self.pos) > boundary - self.axis.of_plane(stack_center)
    }
}
