//! Falling pieces
//!
//! Overhangs cut off the moving block drop one layer over a fixed duration and
//! are then discarded. They never touch gameplay state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::block::Footprint;

/// A discarded overhang in its drop animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingPiece {
    pub id: u32,
    pub footprint: Footprint,
    /// Position when the drop started
    pub start_pos: Vec3,
    /// Display tint (RGB, 0-1)
    pub tint: [f32; 3],
    /// Seconds since the drop started
    pub elapsed: f32,
    /// Total drop time
    pub duration: f32,
    /// Vertical distance covered over the drop
    pub drop: f32,
}

impl FallingPiece {
    /// Drop progress, 0-1
    #[inline]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Current position (linear descent)
    pub fn pos(&self) -> Vec3 {
        self.start_pos - Vec3::Y * self.drop * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// All pieces currently dropping, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallingPieces {
    pieces: Vec<FallingPiece>,
    next_id: u32,
}

impl FallingPieces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dropping a piece. Returns its id.
    pub fn spawn(
        &mut self,
        footprint: Footprint,
        pos: Vec3,
        tint: [f32; 3],
        duration: f32,
        drop: f32,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pieces.push(FallingPiece {
            id,
            footprint,
            start_pos: pos,
            tint,
            elapsed: 0.0,
            duration,
            drop,
        });
        id
    }

    /// Advance every drop and prune finished pieces. Returns how many expired.
    pub fn advance(&mut self, dt: f32) -> usize {
        for piece in &mut self.pieces {
            piece.elapsed += dt;
        }
        let before = self.pieces.len();
        self.pieces.retain(|p| !p.is_finished());
        before - self.pieces.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingPiece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_one(pieces: &mut FallingPieces) -> u32 {
        pieces.spawn(
            Footprint::new(30.0, 5.0),
            Vec3::new(0.0, 4.0, -7.5),
            [1.0; 3],
            1.0,
            4.0,
        )
    }

    #[test]
    fn test_linear_drop() {
        let mut pieces = FallingPieces::new();
        spawn_one(&mut pieces);

        assert_eq!(pieces.advance(0.25), 0);
        let piece = pieces.iter().next().expect("piece alive");
        assert_eq!(piece.progress(), 0.25);
        assert_eq!(piece.pos(), Vec3::new(0.0, 3.0, -7.5));

        assert_eq!(pieces.advance(0.25), 0);
        let piece = pieces.iter().next().expect("piece alive");
        assert_eq!(piece.pos(), Vec3::new(0.0, 2.0, -7.5));
    }

    #[test]
    fn test_expired_pieces_are_pruned() {
        let mut pieces = FallingPieces::new();
        spawn_one(&mut pieces);
        pieces.advance(0.5);
        spawn_one(&mut pieces);
        assert_eq!(pieces.len(), 2);

        assert_eq!(pieces.advance(0.5), 1);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces.iter().next().map(|p| p.id), Some(1));

        assert_eq!(pieces.advance(0.5), 1);
        assert!(pieces.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut pieces = FallingPieces::new();
        let a = spawn_one(&mut pieces);
        let b = spawn_one(&mut pieces);
        pieces.clear();
        let c = spawn_one(&mut pieces);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }
}
