//! Grid tests - playfield storage, bounds and line clears

use guideline_tetris::core::Grid;
use guideline_tetris::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH, VISIBLE_TOP};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);

    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert!(grid.is_empty_at(x, y), "Cell ({}, {}) should be empty", x, y);
            assert_eq!(grid.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, GRID_HEIGHT as i8), None);

    assert!(grid.is_out_of_bounds(-1, 5));
    assert!(grid.is_out_of_bounds(3, GRID_HEIGHT as i8));
    assert!(!grid.is_empty_at(-1, 5));
}

#[test]
fn test_buffer_rows_are_real_cells() {
    let mut grid = Grid::new();
    assert!(grid.set(4, 0, Some(PieceKind::Z)));
    assert!(grid.set(4, VISIBLE_TOP as i8 - 1, Some(PieceKind::Z)));
    assert_eq!(grid.get(4, 0), Some(Some(PieceKind::Z)));
    assert!(grid.is_occupied(4, VISIBLE_TOP as i8 - 1));
}

#[test]
fn test_grid_set_and_clear_cell() {
    let mut grid = Grid::new();
    assert!(grid.set(5, 30, Some(PieceKind::T)));
    assert_eq!(grid.get(5, 30), Some(Some(PieceKind::T)));
    assert!(grid.set(5, 30, None));
    assert!(grid.is_empty_at(5, 30));
    assert!(!grid.set(10, 30, Some(PieceKind::T)));
}

#[test]
fn test_single_line_clear_shifts_rows_down() {
    let mut grid = Grid::new();
    grid.fill_row(39, PieceKind::I);
    grid.set(2, 38, Some(PieceKind::S));
    grid.set(7, 20, Some(PieceKind::J));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[39]);
    assert_eq!(grid.get(2, 39), Some(Some(PieceKind::S)));
    assert_eq!(grid.get(7, 21), Some(Some(PieceKind::J)));
    assert!(grid.is_empty_at(7, 20));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_non_adjacent_rows_clear_together() {
    let rows = [
        "#.........",
        "##########",
        ".#........",
        "##########",
    ];
    let mut grid = Grid::from_ascii(&rows, PieceKind::O);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[39, 37]);
    assert_eq!(grid.get(1, 39), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(0, 38), Some(Some(PieceKind::O)));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_four_line_clear_leaves_stack_intact() {
    let mut grid = Grid::new();
    for y in 36..40 {
        grid.fill_row(y, PieceKind::I);
    }
    for x in 0..4 {
        grid.set(x, 35, Some(PieceKind::L));
    }

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    for x in 0..4 {
        assert_eq!(grid.get(x, 39), Some(Some(PieceKind::L)));
    }
    assert_eq!(grid.occupied_count(), 4);
}

#[test]
fn test_check_and_clear_only_tests_candidates() {
    let mut grid = Grid::new();
    grid.fill_row(39, PieceKind::I);
    grid.fill_row(30, PieceKind::I);

    let cleared = grid.check_and_clear(&[30, 31, 30, 99]);
    assert_eq!(cleared.as_slice(), &[30]);
    assert!(grid.is_row_complete(39));
}

#[test]
fn test_lock_cells_refuses_overlap() {
    let mut grid = Grid::new();
    grid.set(4, 39, Some(PieceKind::T));
    let cells = [(3, 39), (4, 39), (5, 39), (4, 38)];
    assert!(!grid.lock_cells(&cells, PieceKind::T));
    assert_eq!(grid.occupied_count(), 1);

    let cells = [(3, 38), (4, 38), (5, 38), (4, 37)];
    assert!(grid.lock_cells(&cells, PieceKind::T));
    assert_eq!(grid.occupied_count(), 5);
}

#[test]
fn test_u8_grid_codes() {
    let mut grid = Grid::new();
    grid.set(0, 39, Some(PieceKind::I));
    grid.set(9, 39, Some(PieceKind::L));

    let mut out = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
    grid.write_u8_grid(&mut out);
    assert_eq!(out[39][0], PieceKind::I.code());
    assert_eq!(out[39][9], PieceKind::L.code());
    assert_eq!(out[39][5], 0);
}
