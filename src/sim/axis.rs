//! Horizontal axis selection
//!
//! Blocks slide along X on even rounds and along Z on odd rounds. The stack
//! center is kept as a `Vec2` in the ground plane, so plane `y` is world `z`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One of the two horizontal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

/// Axis the block of the given round travels along
#[inline]
pub fn axis_for(round: u32) -> Axis {
    if round.is_multiple_of(2) { Axis::X } else { Axis::Z }
}

impl Axis {
    /// The inactive horizontal axis
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Component of a world position along this axis
    #[inline]
    pub fn of(self, pos: Vec3) -> f32 {
        match self {
            Axis::X => pos.x,
            Axis::Z => pos.z,
        }
    }

    /// Set the component of a world position along this axis
    #[inline]
    pub fn set(self, pos: &mut Vec3, value: f32) {
        match self {
            Axis::X => pos.x = value,
            Axis::Z => pos.z = value,
        }
    }

    /// Component of a ground-plane point (x, z) along this axis
    #[inline]
    pub fn of_plane(self, point: Vec2) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Z => point.y,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Z => "Z",
        }
    }
}
