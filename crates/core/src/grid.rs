//! Grid module - the bordered cell matrix
//!
//! The grid is 22 rows x 12 columns: a 20 x 10 playfield wrapped in a frame of
//! `Cell::Border`. Coordinates are `(row, col)` in the bordered index space, so
//! row 0, row 21, col 0 and col 11 are always border.
//!
//! Only locked cells live here. The falling piece is an overlay owned by the
//! engine and is composited in at snapshot time.

use arrayvec::ArrayVec;

use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH, PLAYFIELD_HEIGHT};

const ROWS: usize = GRID_HEIGHT as usize;
const COLS: usize = GRID_WIDTH as usize;

/// First and last interior row / column.
const FIRST_INTERIOR: usize = 1;
const LAST_INTERIOR_ROW: usize = ROWS - 2;
const LAST_INTERIOR_COL: usize = COLS - 2;

/// Row indices of completed lines (at most one per interior row).
pub type CompletedRows = ArrayVec<usize, { PLAYFIELD_HEIGHT as usize }>;

/// The bordered game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    /// Create a grid with an empty interior and a full border frame
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if !Self::is_interior(row as i8, col as i8) {
                    *cell = Cell::Border;
                }
            }
        }
        Self { cells }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<(usize, usize)> {
        if row < 0 || col < 0 || row as usize >= ROWS || col as usize >= COLS {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Whether `(row, col)` is a playfield cell (not border, not outside)
    pub fn is_interior(row: i8, col: i8) -> bool {
        (FIRST_INTERIOR as i8..=LAST_INTERIOR_ROW as i8).contains(&row)
            && (FIRST_INTERIOR as i8..=LAST_INTERIOR_COL as i8).contains(&col)
    }

    /// Get cell at `(row, col)`; `None` if outside the physical grid
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.cells[r][c])
    }

    /// Set an interior cell
    ///
    /// Returns false (and leaves the grid untouched) for border or
    /// out-of-bounds coordinates, and when asked to write a border value.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        if !Self::is_interior(row, col) || cell.is_border() {
            return false;
        }
        self.cells[row as usize][col as usize] = cell;
        true
    }

    /// Check if `(row, col)` is inside the grid and empty
    pub fn is_empty_at(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// A row is complete when none of its cells is empty.
    ///
    /// Border cells are never empty, so only the interior decides.
    pub fn is_row_complete(&self, row: usize) -> bool {
        if !(FIRST_INTERIOR..=LAST_INTERIOR_ROW).contains(&row) {
            return false;
        }
        self.cells[row].iter().all(|cell| !cell.is_empty())
    }

    /// Interior row indices that are complete, top to bottom
    pub fn completed_rows(&self) -> CompletedRows {
        (FIRST_INTERIOR..=LAST_INTERIOR_ROW)
            .filter(|&row| self.is_row_complete(row))
            .collect()
    }

    /// Whether any cell of the topmost interior row is locked
    pub fn top_row_occupied(&self) -> bool {
        self.cells[FIRST_INTERIOR].iter().any(|cell| cell.is_locked())
    }

    /// Remove `rows` and let everything above fall into the gap
    ///
    /// Works bottom-up with a read and a write cursor, so each surviving row
    /// moves down by the number of removed rows below it. The rows freed at
    /// the top are refilled with empty interior cells. Border columns are
    /// identical in every interior row and are left alone.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut write = LAST_INTERIOR_ROW;
        let mut removed = 0;

        for read in (FIRST_INTERIOR..=LAST_INTERIOR_ROW).rev() {
            if rows.contains(&read) {
                removed += 1;
                continue;
            }
            if write != read {
                self.cells[write] = self.cells[read];
            }
            write -= 1;
        }

        for row in FIRST_INTERIOR..FIRST_INTERIOR + removed {
            self.clear_interior_row(row);
        }

        removed
    }

    fn clear_interior_row(&mut self, row: usize) {
        for cell in &mut self.cells[row][FIRST_INTERIOR..=LAST_INTERIOR_COL] {
            *cell = Cell::Empty;
        }
    }

    /// Fill every interior cell of `row` with `cell` (fixtures and benches)
    pub fn fill_row(&mut self, row: usize, cell: Cell) {
        if !(FIRST_INTERIOR..=LAST_INTERIOR_ROW).contains(&row) || cell.is_border() {
            return;
        }
        for c in &mut self.cells[row][FIRST_INTERIOR..=LAST_INTERIOR_COL] {
            *c = cell;
        }
    }

    /// Interior cells of `row` (10 cells)
    pub fn interior_row(&self, row: usize) -> &[Cell] {
        &self.cells[row][FIRST_INTERIOR..=LAST_INTERIOR_COL]
    }

    /// Full physical rows, border included
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Empty the interior, keeping the border
    pub fn clear(&mut self) {
        for row in FIRST_INTERIOR..=LAST_INTERIOR_ROW {
            self.clear_interior_row(row);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
