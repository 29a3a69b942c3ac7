use serde::{Deserialize, Serialize};

use crate::pieces::Tetromino;
use crate::types::{GameStatus, PieceKind, Rotation, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute grid coordinates of the four minos
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimersSnapshot {
    pub gravity_running: bool,
    pub gravity_interval_us: u64,
    pub lock_delay_active: bool,
    pub lock_elapsed_ms: u32,
    pub lock_move_count: u8,
}

/// Everything a presentation layer needs to draw one frame.
///
/// `grid` holds one row per grid row, top to bottom, with 0 for empty cells and
/// [`PieceKind::code`] otherwise. The active piece is not baked into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Vec<[u8; GRID_WIDTH as usize]>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next_queue: Vec<PieceKind>,
    pub status: GameStatus,
    pub seed: u32,
    pub pieces_spawned: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid.clear();
        self.grid
            .resize(GRID_HEIGHT as usize, [0u8; GRID_WIDTH as usize]);
        self.active = None;
        self.ghost_y = None;
        self.next_queue.clear();
        self.status = GameStatus::Playing;
        self.seed = 0;
        self.pieces_spawned = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.timers = TimersSnapshot::default();
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Visible rows only (rows 20..40)
    pub fn visible_rows(&self) -> &[[u8; GRID_WIDTH as usize]] {
        let top = self.grid.len().saturating_sub(crate::types::VISIBLE_HEIGHT as usize);
        &self.grid[top..]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: Vec::with_capacity(GRID_HEIGHT as usize),
            active: None,
            ghost_y: None,
            next_queue: Vec::new(),
            status: GameStatus::Playing,
            seed: 0,
            pieces_spawned: 0,
            score: 0,
            level: 1,
            lines: 0,
            timers: TimersSnapshot::default(),
        };
        s.clear();
        s
    }
}
