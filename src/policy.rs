//! Cut decision policies
//!
//! Where the "cut requested" signal comes from. The engine only sees the
//! request; a policy decides when to make it.

use crate::sim::{GameState, TickInput, tick};

/// Source of cut requests, polled once per frame before the tick
pub trait CutPolicy {
    fn wants_cut(&mut self, state: &GameState) -> bool;
}

/// Cuts when the player pressed something since the last frame
#[derive(Debug, Clone, Default)]
pub struct ManualCut {
    pressed: bool,
}

impl ManualCut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press / tap. Presses between frames collapse into one.
    pub fn press(&mut self) {
        self.pressed = true;
    }
}

impl CutPolicy for ManualCut {
    fn wants_cut(&mut self, _state: &GameState) -> bool {
        std::mem::take(&mut self.pressed)
    }
}

/// Cuts automatically once the block is about to line up with the stack
///
/// Projects the block one frame ahead and cuts when the rounded offset lands
/// in `[0, tolerance]` with no negative offset on the other axis.
#[derive(Debug, Clone)]
pub struct AutoCut {
    /// Largest offset accepted
    pub tolerance: f32,
    /// Length of the frame the cut will be applied on
    pub frame_dt: f32,
}

impl AutoCut {
    pub fn new(tolerance: f32, frame_dt: f32) -> Self {
        Self {
            tolerance,
            frame_dt,
        }
    }

    /// Only accept perfect cuts
    pub fn perfect(frame_dt: f32) -> Self {
        Self::new(0.0, frame_dt)
    }
}

impl CutPolicy for AutoCut {
    fn wants_cut(&mut self, state: &GameState) -> bool {
        let Some(block) = state.active.as_ref() else {
            return false;
        };

        let mut projected = block.clone();
        projected.advance(self.frame_dt, state.settings.block_speed);

        let off_axis = block.axis.other();
        let off_offset = off_axis.of(projected.pos) - off_axis.of_plane(state.center);
        let offset = state
            .settings
            .offset_rounding
            .apply(projected.offset_from(state.center));

        off_offset >= 0.0 && (0.0..=self.tolerance).contains(&offset)
    }
}

/// Poll the policy, then tick
pub fn run_frame<P: CutPolicy + ?Sized>(state: &mut GameState, policy: &mut P, dt: f32) {
    if policy.wants_cut(state) {
        state.request_cut();
    }
    tick(state, &TickInput::default(), dt);
}
