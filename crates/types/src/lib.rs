//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond small conversions, making them
//! usable in any context (rules engine, presentation layer, config files).
//!
//! # Grid Dimensions
//!
//! Guideline playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 40 rows (indexed 0-39, top to bottom)
//! - **Buffer zone**: rows 0-19 are hidden above the visible field
//! - **Visible field**: rows 20-39
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Time before a grounded piece locks |
//! | `MOVE_RESET_LIMIT` | 15 | Lock resets allowed per piece in move-reset mode |
//! | `SOFT_DROP_FACTOR` | 20 | Soft drop is 20x faster than gravity |
//!
//! # Gravity Curve
//!
//! `GRAVITY_G[level - 1]` is the guideline speed in G (cells per frame at 60 FPS).
//! Level 1 is one cell per second; level 20 is 20G, effectively instant.
//!
//! # Examples
//!
//! ```
//! use guideline_tetris_types::{PieceKind, Rotation, GameAction, GRID_WIDTH, GRID_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 40);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (40 rows, including the hidden buffer)
pub const GRID_HEIGHT: u8 = 40;

/// Number of hidden buffer rows at the top of the grid
pub const BUFFER_HEIGHT: u8 = 20;

/// First visible row. Any locked mino above this row tops the game out.
pub const VISIBLE_TOP: u8 = BUFFER_HEIGHT;

/// Number of visible rows
pub const VISIBLE_HEIGHT: u8 = GRID_HEIGHT - BUFFER_HEIGHT;

/// Row where a freshly spawned piece's 4x4 mask is placed (last buffer row).
pub const SPAWN_ROW: i8 = VISIBLE_TOP as i8 - 1;

/// Lock delay when piece is grounded (500ms, sub-20G guideline value)
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock timer resets per piece in move-reset mode (15)
pub const MOVE_RESET_LIMIT: u8 = 15;

/// Gravity multiplier while soft drop is held
pub const SOFT_DROP_FACTOR: u32 = 20;

/// Level a new game starts at by default
pub const MIN_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames per second the G unit is defined against
pub const FRAMES_PER_SECOND: f64 = 60.0;

/// Guideline speed curve in G, indexed by `level - 1`.
///
/// Derived from `(0.8 - (level - 1) * 0.007) ^ (level - 1)` seconds per row and capped at 20G.
pub const GRAVITY_G: [f64; MAX_LEVEL as usize] = [
    0.01667, 0.021017, 0.026977, 0.035256, 0.04693, 0.06361, 0.0879, 0.1236, 0.1775, 0.2598,
    0.388, 0.59, 0.92, 1.46, 2.36, 3.91, 6.61, 11.43, 20.0, 20.0,
];

/// Guideline line clear scoring table
///
/// Base points for clearing N lines at level 1:
/// - 1 line (Single): 100
/// - 2 lines (Double): 300
/// - 3 lines (Triple): 500
/// - 4 lines (Tetris): 800
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell descended by soft drop
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;

/// Points per cell descended by hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Default number of upcoming pieces exposed in a snapshot
pub const DEFAULT_PREVIEW_COUNT: usize = 5;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and guideline color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds in canonical order (the contents of a fresh bag)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Guideline color tag
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Non-zero cell code used by the snapshot grid (0 means empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Guideline piece colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Apply a rotation direction
    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Cw => self.rotate_cw(),
            RotateDirection::Ccw => self.rotate_ccw(),
        }
    }

    /// SRS state number (0-3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// State from an SRS state number, taken mod 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction of a rotation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Game actions that can be applied to modify game state
///
/// These are the intents a presentation or input layer feeds the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (scores as soft drop)
    MoveDown,
    /// Begin holding soft drop (gravity runs faster)
    SoftDropStart,
    /// Release soft drop
    SoftDropEnd,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Freeze the game
    Pause,
    /// Unfreeze the game
    Resume,
    /// Reset and start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase or lowercase string
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropend" => Some(GameAction::SoftDropEnd),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropEnd => "softDropEnd",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Restart => "restart",
        }
    }
}

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Paused,
    /// Terminal until the game is restarted
    GameOver,
}

/// How a successful move or rotation affects a running lock delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LockDelayMode {
    /// Every move or rotation restarts the timer, without limit
    Infinity,
    /// Every move or rotation restarts the timer; the 15th reset locks immediately
    #[default]
    MoveReset,
    /// Only a downward step restarts the timer
    StepReset,
}

impl LockDelayMode {
    /// Parse mode from string (case-insensitive, `-`/`_` ignored)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::LockDelayMode;
    ///
    /// assert_eq!(LockDelayMode::from_str("move-reset"), Some(LockDelayMode::MoveReset));
    /// assert_eq!(LockDelayMode::from_str("Infinity"), Some(LockDelayMode::Infinity));
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "infinity" => Some(LockDelayMode::Infinity),
            "movereset" => Some(LockDelayMode::MoveReset),
            "stepreset" => Some(LockDelayMode::StepReset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LockDelayMode::Infinity => "infinity",
            LockDelayMode::MoveReset => "move-reset",
            LockDelayMode::StepReset => "step-reset",
        }
    }
}

/// Which top-out condition ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopOut {
    /// A new piece overlapped occupied cells at spawn
    BlockOut,
    /// A piece locked with a mino above the visible field
    LockOut,
}

/// Core-side event recorded after a piece locks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Cleared row indices in pre-clear coordinates, bottom to top
    pub cleared_rows: Vec<u8>,
    /// Line clear points awarded (drop bonuses excluded)
    pub points: u32,
    pub level_before: u32,
    pub level_after: u32,
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
