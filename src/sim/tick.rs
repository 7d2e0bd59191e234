//! Per-frame simulation tick
//!
//! Core game loop that advances the round state machine by the elapsed time.

use super::slice::{SliceOutcome, slice};
use super::state::{GameOverReason, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cut the moving block (key/tap/auto-cut)
    pub cut: bool,
}

/// Advance the game state by `elapsed` seconds
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) {
    let elapsed = if elapsed.is_finite() {
        elapsed.max(0.0)
    } else {
        0.0
    };

    // Drops run regardless of phase, including after game over
    let expired = state.falling.advance(elapsed);
    if expired > 0 {
        log::trace!("{} falling piece(s) expired", expired);
    }

    let cut = state.take_pending_cut() || input.cut;
    if state.is_game_over() {
        return;
    }

    let speed = state.settings.block_speed;
    let boundary = state.settings.play_boundary;
    let rounding = state.settings.offset_rounding;
    let center = state.center;
    let footprint = state.footprint;

    // A cut that arrives with no block in play is dropped
    let Some(block) = state.active.as_mut() else {
        state.spawn_block();
        return;
    };

    block.advance(elapsed, speed);

    if block.has_overshot(boundary, center) {
        log::debug!("Round {} block overshot at {:?}", block.round, block.pos);
        // The overshooting block never became a layer
        let score = state.height.saturating_sub(1);
        state.finish(GameOverReason::Overshot, score);
        return;
    }

    if !cut {
        return;
    }

    let tint = block.tint;
    match slice(block, center, footprint, rounding) {
        SliceOutcome::Sliced(result) => state.apply_slice(&result, tint),
        SliceOutcome::NoOverlap { offset } => {
            log::debug!("Round {} cut missed the stack (offset {})", state.height, offset);
            let score = state.height;
            state.finish(GameOverReason::NoOverlap, score);
        }
    }
}
