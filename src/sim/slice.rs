//! Cutting the moving block against the stack top
//!
//! A cut splits the moving block along its axis of travel. The part that
//! overlaps the stack stays and becomes the new top; the rest falls. Only the
//! active axis is clipped: the off-axis extent of both pieces is the full
//! stack extent.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::axis::Axis;
use super::block::{Footprint, MovingBlock};
use crate::settings::OffsetRounding;

/// A placed box: footprint plus center position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub footprint: Footprint,
    pub pos: Vec3,
}

/// Result of a successful cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub axis: Axis,
    /// Rounded offset of the block from the stack center at cut time
    pub offset: f32,
    /// Overlapping part, new stack top
    pub staying: Piece,
    /// Overhanging part
    pub falling: Piece,
}

impl Slice {
    /// False for a perfect cut, where nothing overhangs
    pub fn has_falling(&self) -> bool {
        self.falling.footprint.extent(self.axis) > 0.0
    }

    /// New stack center (ground plane)
    pub fn new_center(&self) -> Vec2 {
        Vec2::new(self.staying.pos.x, self.staying.pos.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliceOutcome {
    Sliced(Slice),
    /// The block missed the stack entirely
    NoOverlap { offset: f32 },
}

/// Cut `block` against a stack top with the given center and footprint
pub fn slice(
    block: &MovingBlock,
    stack_center: Vec2,
    stack_footprint: Footprint,
    rounding: OffsetRounding,
) -> SliceOutcome {
    let axis = block.axis;
    let off_axis = axis.other();

    let offset = rounding.apply(block.offset_from(stack_center));
    let stack_extent = stack_footprint.extent(axis);
    let staying_extent = stack_extent - offset.abs();

    if staying_extent <= 0.0 {
        return SliceOutcome::NoOverlap { offset };
    }

    let layer_y = block.pos.y;
    let center_along = axis.of_plane(stack_center);

    let mut staying_pos = Vec3::new(0.0, layer_y, 0.0);
    off_axis.set(&mut staying_pos, off_axis.of_plane(stack_center));
    axis.set(&mut staying_pos, center_along + offset / 2.0);

    let mut falling_pos = staying_pos;
    axis.set(&mut falling_pos, axis.of(block.pos) + offset / 2.0);

    SliceOutcome::Sliced(Slice {
        axis,
        offset,
        staying: Piece {
            footprint: stack_footprint.with_extent(axis, staying_extent),
            pos: staying_pos,
        },
        falling: Piece {
            footprint: stack_footprint.with_extent(axis, stack_extent - staying_extent),
            pos: falling_pos,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn block_at(round: u32, along: f32, footprint: Footprint, center: Vec2) -> MovingBlock {
        let mut block = MovingBlock::spawn(round, footprint, center, &Settings::default(), [1.0; 3]);
        block.axis.set(&mut block.pos, along);
        block
    }

    fn sliced(outcome: SliceOutcome) -> Slice {
        match outcome {
            SliceOutcome::Sliced(slice) => slice,
            SliceOutcome::NoOverlap { offset } => panic!("unexpected no-overlap at {offset}"),
        }
    }

    #[test]
    fn test_slice_negative_offset_on_z() {
        let footprint = Footprint::new(30.0, 30.0);
        let block = block_at(1, -5.0, footprint, Vec2::ZERO);
        let slice = sliced(slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor));

        assert_eq!(slice.axis, Axis::Z);
        assert_eq!(slice.offset, -5.0);
        assert_eq!(slice.staying.footprint, Footprint::new(30.0, 25.0));
        assert_eq!(slice.staying.pos, Vec3::new(0.0, 4.0, -2.5));
        assert_eq!(slice.falling.footprint, Footprint::new(30.0, 5.0));
        assert_eq!(slice.falling.pos, Vec3::new(0.0, 4.0, -7.5));
        assert_eq!(slice.new_center(), Vec2::new(0.0, -2.5));
        assert!(slice.has_falling());
    }

    #[test]
    fn test_slice_positive_offset_on_x() {
        let footprint = Footprint::new(30.0, 25.0);
        let center = Vec2::new(0.0, -2.5);
        let block = block_at(2, 8.0, footprint, center);
        let slice = sliced(slice(&block, center, footprint, OffsetRounding::Floor));

        assert_eq!(slice.axis, Axis::X);
        assert_eq!(slice.staying.footprint, Footprint::new(22.0, 25.0));
        assert_eq!(slice.staying.pos, Vec3::new(4.0, 8.0, -2.5));
        // Falling piece spans the whole inactive extent
        assert_eq!(slice.falling.footprint, Footprint::new(8.0, 25.0));
        assert_eq!(slice.falling.pos, Vec3::new(12.0, 8.0, -2.5));
    }

    #[test]
    fn test_perfect_cut() {
        let footprint = Footprint::new(30.0, 30.0);
        let block = block_at(1, 0.4, footprint, Vec2::ZERO);
        let slice = sliced(slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor));

        assert_eq!(slice.offset, 0.0);
        assert_eq!(slice.staying.footprint, footprint);
        assert_eq!(slice.falling.footprint.extent(Axis::Z), 0.0);
        assert!(!slice.has_falling());
    }

    #[test]
    fn test_floor_rounds_toward_negative_infinity() {
        let footprint = Footprint::new(30.0, 30.0);
        let block = block_at(1, -0.5, footprint, Vec2::ZERO);

        let floored = sliced(slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor));
        assert_eq!(floored.offset, -1.0);
        assert_eq!(floored.staying.footprint.depth, 29.0);

        let raw = sliced(slice(&block, Vec2::ZERO, footprint, OffsetRounding::Raw));
        assert_eq!(raw.offset, -0.5);
        assert_eq!(raw.staying.footprint.depth, 29.5);
    }

    #[test]
    fn test_full_extent_offset_is_no_overlap() {
        let footprint = Footprint::new(30.0, 30.0);
        let block = block_at(1, 30.0, footprint, Vec2::ZERO);
        assert_eq!(
            slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor),
            SliceOutcome::NoOverlap { offset: 30.0 }
        );

        let block = block_at(1, -45.0, footprint, Vec2::ZERO);
        assert!(matches!(
            slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor),
            SliceOutcome::NoOverlap { .. }
        ));
    }

    #[test]
    fn test_floor_tie_at_boundary() {
        // -29.5 floors to -30 and misses; raw keeps a half-unit sliver
        let footprint = Footprint::new(30.0, 30.0);
        let block = block_at(1, -29.5, footprint, Vec2::ZERO);
        assert!(matches!(
            slice(&block, Vec2::ZERO, footprint, OffsetRounding::Floor),
            SliceOutcome::NoOverlap { offset } if offset == -30.0
        ));
        assert!(matches!(
            slice(&block, Vec2::ZERO, footprint, OffsetRounding::Raw),
            SliceOutcome::Sliced(_)
        ));
    }

    proptest! {
        #[test]
        fn prop_extent_is_conserved(
            along in -29.0f32..29.0,
            width in 1.0f32..60.0,
            depth in 1.0f32..60.0,
            round in 1u32..50,
        ) {
            let footprint = Footprint::new(width, depth);
            let block = block_at(round, along, footprint, Vec2::ZERO);
            if let SliceOutcome::Sliced(slice) =
                slice(&block, Vec2::ZERO, footprint, OffsetRounding::Raw)
            {
                let axis = slice.axis;
                let total = slice.staying.footprint.extent(axis) + slice.falling.footprint.extent(axis);
                prop_assert!((total - footprint.extent(axis)).abs() < 1e-3);
                prop_assert_eq!(slice.staying.footprint.extent(axis.other()), footprint.extent(axis.other()));
                prop_assert_eq!(slice.falling.footprint.extent(axis.other()), footprint.extent(axis.other()));
                prop_assert!(slice.staying.footprint.is_solid());
            }
        }

        #[test]
        fn prop_offset_beyond_extent_never_stays(
            extent in 1u32..60,
            excess in 0.0f32..100.0,
            negative in any::<bool>(),
            round in 1u32..50,
        ) {
            let extent = extent as f32;
            let footprint = Footprint::new(extent, extent);
            let along = if negative { -(extent + excess) } else { extent + excess };
            let block = block_at(round, along, footprint, Vec2::ZERO);
            for rounding in [OffsetRounding::Floor, OffsetRounding::Raw] {
                let outcome = slice(&block, Vec2::ZERO, footprint, rounding);
                prop_assert!(
                    matches!(outcome, SliceOutcome::NoOverlap { .. }),
                    "expected no overlap, got {:?}",
                    outcome
                );
            }
        }

        #[test]
        fn prop_zero_offset_keeps_full_footprint(
            cx in -20.0f32..20.0,
            cz in -20.0f32..20.0,
            round in 1u32..50,
        ) {
            let footprint = Footprint::new(30.0, 30.0);
            let center = Vec2::new(cx, cz);
            let mut block = MovingBlock::spawn(round, footprint, center, &Settings::default(), [1.0; 3]);
            block.axis.set(&mut block.pos, block.axis.of_plane(center));
            let slice = sliced(slice(&block, center, footprint, OffsetRounding::Raw));
            prop_assert_eq!(slice.staying.footprint, footprint);
            prop_assert!(!slice.has_falling());
        }
    }
}
