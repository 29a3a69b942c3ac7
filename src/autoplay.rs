//! Headless autoplay - a small deterministic placement policy
//!
//! For every rotation and column the policy replays the inputs on a clone of the game, scores
//! the resulting grid, and then feeds the winning inputs to the real game. Because the engine
//! is deterministic the real game ends up exactly where the clone did.

use tracing::{debug, trace};

use crate::core::{GameState, Grid};
use crate::types::{GameAction, GRID_HEIGHT, GRID_WIDTH, VISIBLE_TOP};

// Weights from the well-known four-feature linear evaluator
const HEIGHT_WEIGHT: f64 = -0.510066;
const LINES_WEIGHT: f64 = 0.760666;
const HOLES_WEIGHT: f64 = -0.35663;
const BUMPINESS_WEIGHT: f64 = -0.184483;

/// Features of a grid the evaluator looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub max_height: u32,
}

impl GridFeatures {
    pub fn of(grid: &Grid) -> Self {
        let mut heights = [0u32; GRID_WIDTH as usize];
        let mut holes = 0;
        for x in 0..GRID_WIDTH as i8 {
            let mut seen_block = false;
            for y in VISIBLE_TOP as i8..GRID_HEIGHT as i8 {
                if grid.is_occupied(x, y) {
                    if !seen_block {
                        heights[x as usize] = (GRID_HEIGHT as i8 - y) as u32;
                        seen_block = true;
                    }
                } else if seen_block {
                    holes += 1;
                }
            }
        }

        let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        Self {
            aggregate_height: heights.iter().sum(),
            holes,
            bumpiness,
            max_height: heights.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Inputs that take a freshly spawned piece to one rotation and column, then hard drop it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub rotations: u8,
    /// Signed horizontal shift; negative moves left
    pub shift: i8,
    pub actions: Vec<GameAction>,
}

impl Placement {
    pub fn new(rotations: u8, shift: i8) -> Self {
        let mut actions = Vec::with_capacity(rotations as usize + shift.unsigned_abs() as usize + 1);
        actions.extend(std::iter::repeat(GameAction::RotateCw).take(rotations as usize));
        let step = if shift < 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        actions.extend(std::iter::repeat(step).take(shift.unsigned_abs() as usize));
        actions.push(GameAction::HardDrop);
        Self {
            rotations,
            shift,
            actions,
        }
    }
}

/// Drives a game by itself, one placement per piece
#[derive(Debug, Clone)]
pub struct Autoplayer {
    /// Time fed to the engine after every input
    pub frame_ms: u32,
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self { frame_ms: 16 }
    }
}

impl Autoplayer {
    pub fn new(frame_ms: u32) -> Self {
        Self { frame_ms }
    }

    /// Apply one placement's inputs. Stops early if the piece locks or the game ends.
    pub fn execute(&self, game: &mut GameState, placement: &Placement) {
        let spawned = game.pieces_spawned();
        for &action in &placement.actions {
            if game.is_game_over() || game.pieces_spawned() != spawned {
                break;
            }
            game.apply_action(action);
            game.tick(self.frame_ms);
        }
    }

    fn evaluate(before: &GameState, after: &GameState) -> f64 {
        if after.is_game_over() {
            return f64::NEG_INFINITY;
        }
        let features = GridFeatures::of(after.grid());
        let lines = after.lines().saturating_sub(before.lines());
        HEIGHT_WEIGHT * features.aggregate_height as f64
            + LINES_WEIGHT * lines as f64
            + HOLES_WEIGHT * features.holes as f64
            + BUMPINESS_WEIGHT * features.bumpiness as f64
    }

    /// Best placement for the current piece, or `None` without an active piece
    pub fn choose(&self, game: &GameState) -> Option<Placement> {
        game.active()?;

        let mut best: Option<(f64, Placement)> = None;
        for rotations in 0..4u8 {
            for shift in -(GRID_WIDTH as i8)..=GRID_WIDTH as i8 {
                let placement = Placement::new(rotations, shift);
                let mut trial = game.clone();
                self.execute(&mut trial, &placement);
                let score = Self::evaluate(game, &trial);
                trace!(rotations, shift, score, "candidate");
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((score, placement));
                }
            }
        }
        best.map(|(_, placement)| placement)
    }

    /// Place pieces until `max_pieces` have been placed or the game ends.
    ///
    /// Returns the number of placements made.
    pub fn run(&self, game: &mut GameState, max_pieces: u32) -> u32 {
        let mut placed = 0;
        while placed < max_pieces && !game.is_game_over() {
            let Some(placement) = self.choose(game) else {
                break;
            };
            debug!(
                rotations = placement.rotations,
                shift = placement.shift,
                "placing"
            );
            self.execute(game, &placement);
            placed += 1;
        }
        placed
    }
}
