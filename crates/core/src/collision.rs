//! Collision tester - pure checks of a piece placement against the grid

use crate::grid::Grid;
use crate::pieces::{get_shape, Tetromino};
use crate::types::{PieceKind, Rotation};

/// True if any mino of `kind` in `rotation` with its mask at (x, y) falls outside the
/// 10x40 field or onto an occupied cell.
pub fn collides(kind: PieceKind, rotation: Rotation, x: i8, y: i8, grid: &Grid) -> bool {
    get_shape(kind, rotation)
        .iter()
        .any(|&(dx, dy)| !grid.is_empty_at(x + dx, y + dy))
}

/// Placement test for a whole piece
pub fn piece_collides(piece: &Tetromino, grid: &Grid) -> bool {
    collides(piece.kind, piece.rotation, piece.x, piece.y, grid)
}

/// True if the piece fits one cell in the given direction. The piece is not moved.
pub fn can_move(piece: &Tetromino, grid: &Grid, dx: i8, dy: i8) -> bool {
    !piece_collides(&piece.shifted(dx, dy), grid)
}

pub fn can_move_down(piece: &Tetromino, grid: &Grid) -> bool {
    can_move(piece, grid, 0, 1)
}

pub fn can_move_left(piece: &Tetromino, grid: &Grid) -> bool {
    can_move(piece, grid, -1, 0)
}

pub fn can_move_right(piece: &Tetromino, grid: &Grid) -> bool {
    can_move(piece, grid, 1, 0)
}

/// Number of rows the piece can fall before landing
pub fn drop_distance(piece: &Tetromino, grid: &Grid) -> i8 {
    let mut distance = 0;
    while can_move(piece, grid, 0, distance + 1) {
        distance += 1;
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_HEIGHT, GRID_WIDTH};

    #[test]
    fn test_empty_grid_spawn_does_not_collide() {
        let grid = Grid::new();
        for kind in PieceKind::ALL {
            assert!(!piece_collides(&Tetromino::new(kind), &grid));
        }
    }

    #[test]
    fn test_walls_and_floor_collide() {
        let grid = Grid::new();
        // T north occupies mask columns 0..=2 and rows 0..=1.
        assert!(collides(PieceKind::T, Rotation::North, -1, 10, &grid));
        assert!(!collides(PieceKind::T, Rotation::North, 0, 10, &grid));
        assert!(collides(PieceKind::T, Rotation::North, GRID_WIDTH as i8 - 2, 10, &grid));
        assert!(!collides(PieceKind::T, Rotation::North, 0, GRID_HEIGHT as i8 - 2, &grid));
        assert!(collides(PieceKind::T, Rotation::North, 0, GRID_HEIGHT as i8 - 1, &grid));
        // Empty mask cells may hang outside the field.
        assert!(!collides(PieceKind::I, Rotation::North, 0, -1, &grid));
        assert!(collides(PieceKind::I, Rotation::North, 0, -2, &grid));
    }

    #[test]
    fn test_occupied_cell_collides() {
        let mut grid = Grid::new();
        grid.set(4, 31, Some(PieceKind::Z));
        assert!(collides(PieceKind::O, Rotation::North, 3, 30, &grid));
        assert!(!collides(PieceKind::O, Rotation::North, 5, 30, &grid));
    }

    #[test]
    fn test_directional_wrappers_do_not_move_piece() {
        let grid = Grid::new();
        let piece = Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: -1,
            y: 38,
        };
        assert!(!can_move_left(&piece, &grid));
        assert!(can_move_right(&piece, &grid));
        assert!(!can_move_down(&piece, &grid));
        assert_eq!(piece.x, -1);
    }

    #[test]
    fn test_drop_distance() {
        let grid = Grid::new();
        let piece = Tetromino::new(PieceKind::I);
        // I north minos sit on mask row 1; floor row is 39.
        assert_eq!(drop_distance(&piece, &grid), 39 - (piece.y + 1));
    }
}
