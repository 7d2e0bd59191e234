//! Game state and core simulation types
//!
//! Everything a round needs lives in one owned `GameState`, so independent
//! games can run side by side and a game can be reset in place.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::axis::Axis;
use super::block::{Footprint, MovingBlock};
use super::falling::FallingPieces;
use super::slice::Slice;
use crate::consts::BASE_TINT;
use crate::settings::{Settings, SettingsError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No active block; the next tick spawns one
    Spawning,
    /// A block is sliding and can be cut
    Moving,
    /// Run ended
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The block slid past the play boundary uncut
    Overshot,
    /// A cut missed the stack
    NoOverlap,
}

/// Things that happened during a tick, for presentation collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { round: u32, axis: Axis },
    Cut { round: u32, offset: f32, staying: Footprint },
    /// Cut with nothing overhanging
    Perfect { round: u32 },
    Overshot { score: u32 },
    NoOverlap { score: u32 },
}

/// One resting block of the tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    /// Round that placed it (0 for the base)
    pub round: u32,
    pub footprint: Footprint,
    pub pos: Vec3,
    pub tint: [f32; 3],
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Round counter, starts at 1; doubles as the live score
    pub height: u32,
    pub phase: GamePhase,
    /// Center of the stack top in the ground plane (x, z)
    pub center: Vec2,
    /// Footprint of the stack top
    pub footprint: Footprint,
    /// Block sliding this round
    pub active: Option<MovingBlock>,
    /// Resting blocks, base first; the last one is the stack top
    pub layers: Vec<StackLayer>,
    /// Overhangs still dropping
    pub falling: FallingPieces,
    pub game_over_reason: Option<GameOverReason>,
    /// Score frozen at game over
    pub final_score: Option<u32>,
    /// Cut requested since the last tick (coalesced)
    #[serde(default)]
    pending_cut: bool,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::fresh(Settings::default())
    }
}

impl GameState {
    /// Start a game with validated settings
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::fresh(settings))
    }

    fn fresh(settings: Settings) -> Self {
        let footprint = settings.base_footprint;
        let base = StackLayer {
            round: 0,
            footprint,
            pos: Vec3::ZERO,
            tint: BASE_TINT,
        };
        Self {
            settings,
            height: 1,
            phase: GamePhase::Spawning,
            center: Vec2::ZERO,
            footprint,
            active: None,
            layers: vec![base],
            falling: FallingPieces::new(),
            game_over_reason: None,
            final_score: None,
            pending_cut: false,
            events: Vec::new(),
        }
    }

    /// Start over with the same settings; in-flight falling pieces are dropped
    pub fn reset(&mut self) {
        log::info!("Resetting game (was at height {})", self.height);
        *self = Self::fresh(self.settings.clone());
    }

    /// Ask for a cut at the next tick. Repeated requests before then coalesce.
    pub fn request_cut(&mut self) {
        if self.phase == GamePhase::Moving {
            self.pending_cut = true;
        }
    }

    pub(crate) fn take_pending_cut(&mut self) -> bool {
        std::mem::take(&mut self.pending_cut)
    }

    /// Change block speed mid-game
    pub fn set_block_speed(&mut self, speed: f32) -> Result<(), SettingsError> {
        self.settings.set_block_speed(speed)
    }

    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::GameOver
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Live score while running, frozen score after game over
    pub fn score(&self) -> u32 {
        self.final_score.unwrap_or(self.height)
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Current stack top
    pub fn top(&self) -> Option<&StackLayer> {
        self.layers.last()
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Tint for the block of a round, reproducible from the seed
    pub fn tint_for(&self, round: u32) -> [f32; 3] {
        let mut rng = Pcg32::new(self.settings.seed, round as u64);
        [
            rng.random_range(0.5..1.0),
            rng.random_range(0.5..1.0),
            rng.random_range(0.5..1.0),
        ]
    }

    /// Spawn the block for the current round
    pub(crate) fn spawn_block(&mut self) {
        let round = self.height;
        let block = MovingBlock::spawn(
            round,
            self.footprint,
            self.center,
            &self.settings,
            self.tint_for(round),
        );
        log::debug!(
            "Round {} block spawned on {} at {:?}",
            round,
            block.axis.as_str(),
            block.pos
        );
        self.emit(GameEvent::Spawned {
            round,
            axis: block.axis,
        });
        self.active = Some(block);
        self.phase = GamePhase::Moving;
    }

    /// Make a successful cut the new stack top and move to the next round
    pub(crate) fn apply_slice(&mut self, slice: &Slice, tint: [f32; 3]) {
        let round = self.height;

        if slice.has_falling() {
            self.falling.spawn(
                slice.falling.footprint,
                slice.falling.pos,
                tint,
                self.settings.fall_duration,
                self.settings.layer_thickness,
            );
        } else {
            self.emit(GameEvent::Perfect { round });
        }

        self.center = slice.new_center();
        self.footprint = slice.staying.footprint;
        self.layers.push(StackLayer {
            round,
            footprint: slice.staying.footprint,
            pos: slice.staying.pos,
            tint,
        });
        self.emit(GameEvent::Cut {
            round,
            offset: slice.offset,
            staying: slice.staying.footprint,
        });

        self.active = None;
        self.height += 1;
        self.phase = GamePhase::Spawning;
        log::info!(
            "Round {} cut at offset {}: footprint now {}x{}",
            round,
            slice.offset,
            self.footprint.width,
            self.footprint.depth
        );
    }

    /// End the run. The active block is discarded without producing pieces.
    pub(crate) fn finish(&mut self, reason: GameOverReason, score: u32) {
        self.active = None;
        self.pending_cut = false;
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.final_score = Some(score);
        self.emit(match reason {
            GameOverReason::Overshot => GameEvent::Overshot { score },
            GameOverReason::NoOverlap => GameEvent::NoOverlap { score },
        });
        log::info!("Game over ({:?}) with score {}", reason, score);
    }
}
