//! Pieces module - Tetromino shapes and SRS kick tables
//!
//! Every piece is described by four rotation states, each a 4x4 mask with exactly four set
//! cells. Masks are stored as the (x, y) offsets of their set cells from the mask's top-left
//! corner, with y growing downward like the grid.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, RotateDirection, Rotation, GRID_WIDTH, SPAWN_ROW};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Side length of the mask every shape lives in
pub const MASK_SIZE: usize = 4;

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation.index()]
}

/// Render a shape as a 4x4 boolean mask, indexed `[row][col]`
pub fn get_mask(kind: PieceKind, rotation: Rotation) -> [[bool; MASK_SIZE]; MASK_SIZE] {
    let mut mask = [[false; MASK_SIZE]; MASK_SIZE];
    for (x, y) in get_shape(kind, rotation) {
        mask[y as usize][x as usize] = true;
    }
    mask
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// Shape table indexed `[kind][rotation]`
const SHAPES: [[PieceShape; 4]; 7] = [
    // I: horizontal on row 1 / vertical on column 2 / row 2 / column 1
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O: identical in every state
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Active falling piece: kind, rotation state and the grid position of its mask's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a tetromino at its raw guideline spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy of this piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Kick class a piece kind rotates with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    I,
    O,
    Jlstz,
}

impl KickClass {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => KickClass::I,
            PieceKind::O => KickClass::O,
            _ => KickClass::Jlstz,
        }
    }
}

/// SRS wall kick data, one row per transition.
///
/// Offsets are in grid coordinates (y grows downward), so every y from the published
/// y-up tables is negated here.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get the ordered kick offsets for a rotation transition.
/// The first offset is always (0, 0). O pieces have exactly that one.
pub fn get_kicks(kind: PieceKind, from: Rotation, direction: RotateDirection) -> &'static [(i8, i8)] {
    let index = get_kick_index(from, direction);
    match KickClass::of(kind) {
        KickClass::O => &O_KICKS,
        KickClass::I => &I_KICKS[index],
        KickClass::Jlstz => &JLSTZ_KICKS[index],
    }
}

/// O piece never moves when it rotates
const O_KICKS: [(i8, i8); 1] = [(0, 0)];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Get the kick row for a rotation transition
fn get_kick_index(from: Rotation, direction: RotateDirection) -> usize {
    match (from, direction) {
        (Rotation::North, RotateDirection::Cw) => 0,  // N->E
        (Rotation::North, RotateDirection::Ccw) => 1, // N->W
        (Rotation::East, RotateDirection::Ccw) => 2,  // E->N
        (Rotation::East, RotateDirection::Cw) => 3,   // E->S
        (Rotation::South, RotateDirection::Ccw) => 4, // S->E
        (Rotation::South, RotateDirection::Cw) => 5,  // S->W
        (Rotation::West, RotateDirection::Ccw) => 6,  // W->S
        (Rotation::West, RotateDirection::Cw) => 7,   // W->N
    }
}

/// Guideline spawn column for a piece's mask.
///
/// The piece is centered on the 10-wide field; three-wide pieces round to the left.
pub fn spawn_column(kind: PieceKind) -> i8 {
    let shape = get_shape(kind, Rotation::North);
    let min_x = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = shape.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let piece_width = max_x - min_x + 1;
    (GRID_WIDTH as i8 - piece_width) / 2 - min_x
}

/// Raw spawn position (x, y) of the mask, before the drop-after-spawn step
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    (spawn_column(kind), SPAWN_ROW)
}
