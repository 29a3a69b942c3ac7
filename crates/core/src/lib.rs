//! Core game logic - pure, deterministic guideline Tetris rules
//!
//! This crate contains every rule of the game and nothing else. It has no dependencies on
//! terminals, windows, sockets or wall clocks, so it:
//!
//! - **Replays exactly**: the same seed and the same inputs produce the same game
//! - **Runs anywhere**: headless bots, tests and any frontend drive it the same way
//! - **Owns its time**: timers only advance when [`GameState::tick`] is called
//!
//! # Module Structure
//!
//! - [`grid`]: 10x40 playfield (20 hidden buffer rows above 20 visible ones), line clears
//! - [`pieces`]: tetromino masks, SRS kick tables, spawn positions
//! - [`collision`]: placement and movement tests against the grid
//! - [`rotation`]: SRS rotation resolver with ordered wall kicks
//! - [`rng`]: 7-bag randomizer with lookahead
//! - [`gravity`]: level-indexed gravity clock
//! - [`lock_delay`]: lock delay timer with Infinity, Move-reset and Step-reset modes
//! - [`scoring`]: line clear points, drop bonuses, level curve
//! - [`config`]: engine tuning and validation
//! - [`game_state`]: the controller that ties everything together
//! - [`snapshot`]: plain data copy of a game for presentation layers
//!
//! # Example
//!
//! ```
//! use guideline_tetris_core::GameState;
//! use guideline_tetris_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start_game();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.pieces_spawned(), 2);
//! ```
//!
//! # Timing
//!
//! Gravity follows the guideline curve, from one row per second at level 1 to 20 rows per
//! frame at level 20. A grounded piece locks after 500ms unless the lock delay mode lets a
//! move or rotation restart the timer.

pub mod collision;
pub mod config;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod lock_delay;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use guideline_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, drop_distance, piece_collides};
pub use config::{ConfigError, EngineConfig};
pub use game_state::GameState;
pub use gravity::GravityClock;
pub use grid::{ClearedRows, Grid};
pub use lock_delay::{LockDelay, LockDelayState, ResetTrigger};
pub use pieces::{get_kicks, get_mask, get_shape, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use rotation::{try_rotate, RotationOutcome};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, LevelCurve};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
