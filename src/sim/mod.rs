//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod axis;
pub mod block;
pub mod falling;
pub mod replay;
pub mod slice;
pub mod state;
pub mod tick;

pub use axis::{Axis, axis_for};
pub use block::{Footprint, MovingBlock};
pub use falling::{FallingPiece, FallingPieces};
pub use replay::{Command, Frame, parse_script, run_script};
pub use slice::{Piece, Slice, SliceOutcome, slice};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState, StackLayer};
pub use tick::{TickInput, tick};
