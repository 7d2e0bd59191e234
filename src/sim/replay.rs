//! Scripted replays
//!
//! Runs a list of timed commands through a fresh game and records what the
//! engine looks like after every advance. Same script, same frames.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::block::Footprint;
use super::slice::Piece;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, StackLayer};
use super::tick::{TickInput, tick};
use crate::settings::{Settings, SettingsError};

/// One scripted command
///
/// JSON form: `{"advance": 0.016}`, `"cut"`, `{"set_speed": 80.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Run one tick of the given length
    Advance(f32),
    /// Request a cut, applied on the next advance
    Cut,
    /// Change block speed
    SetSpeed(f32),
}

/// Engine snapshot after an advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Total scripted time so far
    pub time: f32,
    pub phase: GamePhase,
    pub height: u32,
    pub score: u32,
    pub active: Option<Piece>,
    pub top: Option<StackLayer>,
    /// Current positions of the dropping overhangs
    pub falling: Vec<Piece>,
    pub game_over: Option<GameOverReason>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    fn capture(state: &mut GameState, time: f32) -> Self {
        let active = state.active.as_ref().map(|b| Piece {
            footprint: b.footprint,
            pos: b.pos,
        });
        let falling = state
            .falling
            .iter()
            .map(|p| Piece {
                footprint: p.footprint,
                pos: p.pos(),
            })
            .collect();
        Self {
            time,
            phase: state.phase,
            height: state.height,
            score: state.score(),
            active,
            top: state.top().copied(),
            falling,
            game_over: state.game_over_reason(),
            events: state.drain_events(),
        }
    }

    /// Footprint of the stack top
    pub fn top_footprint(&self) -> Option<Footprint> {
        self.top.map(|l| l.footprint)
    }

    /// Position of the moving block, if one is in play
    pub fn active_pos(&self) -> Option<Vec3> {
        self.active.map(|p| p.pos)
    }
}

/// Parse a JSON command list
pub fn parse_script(json: &str) -> Result<Vec<Command>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Play `commands` against a new game. One frame per `Advance`.
pub fn run_script(settings: Settings, commands: &[Command]) -> Result<Vec<Frame>, SettingsError> {
    let mut state = GameState::new(settings)?;
    let input = TickInput::default();
    let mut time = 0.0;
    let mut frames = Vec::new();

    for command in commands {
        match *command {
            Command::Advance(dt) => {
                tick(&mut state, &input, dt);
                time += dt;
                frames.push(Frame::capture(&mut state, time));
            }
            Command::Cut => state.request_cut(),
            Command::SetSpeed(speed) => state.set_block_speed(speed)?,
        }
    }

    log::debug!(
        "Script finished: {} frames, height {}, phase {:?}",
        frames.len(),
        state.height,
        state.phase
    );
    Ok(frames)
}
