//! Grid module - the playfield and the line-clear engine
//!
//! The grid is a 10x40 field where each cell can be empty or filled with a piece kind.
//! Rows 0..20 are the hidden buffer zone, rows 20..40 are visible.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..39 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Row indices removed by a clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, { GRID_HEIGHT as usize }>;

/// The playfield - 10 columns x 40 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Fill every cell of a row with `kind`
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if y >= GRID_HEIGHT as usize {
            return;
        }
        let start = y * GRID_WIDTH as usize;
        self.cells[start..start + GRID_WIDTH as usize].fill(Some(kind));
    }

    /// Check if a row is completely filled.
    /// Out-of-range rows are never complete.
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= GRID_HEIGHT as usize {
            return None;
        }
        let start = y * GRID_WIDTH as usize;
        Some(&self.cells[start..start + GRID_WIDTH as usize])
    }

    /// Clear the complete rows among `candidates` and collapse the grid.
    ///
    /// Only the listed rows are tested; duplicates and out-of-range indices are ignored.
    /// Returns the removed row indices (pre-clear coordinates, bottom to top).
    pub fn check_and_clear(&mut self, candidates: &[usize]) -> ClearedRows {
        let mut full = [false; GRID_HEIGHT as usize];
        let mut any = false;
        for &y in candidates {
            if self.is_row_complete(y) {
                full[y] = true;
                any = true;
            }
        }
        if !any {
            return ClearedRows::new();
        }
        self.collapse(&full)
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut full = [false; GRID_HEIGHT as usize];
        for (y, slot) in full.iter_mut().enumerate() {
            *slot = self.is_row_complete(y);
        }
        self.collapse(&full)
    }

    /// Remove the flagged rows and compact survivors downward.
    /// Uses a two-pointer sweep with zero allocation.
    fn collapse(&mut self, full: &[bool; GRID_HEIGHT as usize]) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = GRID_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if full[read_y] {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Empty rows enter at the top
        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Write minos onto the grid.
    /// Returns false (and writes nothing) if any cell is out of bounds or occupied.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_empty_at(x, y)) {
            return false;
        }
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Export the grid as non-zero piece codes (0 = empty)
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        let width = GRID_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from rows of text, bottom-aligned.
    ///
    /// `.` is empty, any other character is an occupied cell. The last line lands on the
    /// bottom row. Lines shorter than the width are padded with empty cells.
    pub fn from_ascii(rows: &[&str], kind: PieceKind) -> Self {
        let mut grid = Self::new();
        let height = GRID_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let rows = &rows[skip..];
        let top = height - rows.len();
        for (i, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().take(GRID_WIDTH as usize).enumerate() {
                if ch != '.' {
                    grid.set(x as i8, (top + i) as i8, Some(kind));
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
