//! Pieces module - tetromino shape matrices and the movable piece
//!
//! A shape is a small occupancy matrix (at most 4x4). Rotation is a plain
//! matrix operation: transpose, then reverse every row, which turns the shape
//! 90° clockwise. There are no kick tables; whether a rotated piece fits is
//! decided by the engine.

use crate::types::PieceKind;

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Occupancy matrix of a piece, stored in a fixed 4x4 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from 0/1 rows. Rows longer than 4 or more than 4 rows are truncated.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let height = rows.len().min(MAX_SHAPE_SIDE);
        let mut width = 0;
        for (r, row) in rows.iter().take(height).enumerate() {
            width = width.max(row.len().min(MAX_SHAPE_SIDE));
            for (c, &v) in row.iter().take(MAX_SHAPE_SIDE).enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        }
    }

    /// Spawn-orientation shape for a piece kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Self::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::J => Self::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Occupied `(row, col)` offsets, row-major
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then reverse each row
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.rows as usize, self.cols as usize);

        let mut transposed = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in self.cells.iter().take(rows).enumerate() {
            for (c, &v) in row.iter().take(cols).enumerate() {
                transposed[c][r] = v;
            }
        }
        for row in transposed.iter_mut().take(cols) {
            row[..rows].reverse();
        }

        Self {
            rows: cols as u8,
            cols: rows as u8,
            cells: transposed,
        }
    }
}

/// The active piece: shape, color and top-left offset in bordered grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// New piece at `(0, 0)` in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self::with_shape(kind, Shape::of(kind))
    }

    pub fn with_shape(kind: PieceKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            x: 0,
            y: 0,
        }
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    // Movement adjusts the offset only; the engine checks validity.

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    pub fn move_up(&mut self) {
        self.y -= 1;
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    /// Copy of this piece shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy of this piece with its shape rotated clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Absolute `(row, col)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dr, dc)| (self.y + dr, self.x + dc))
    }
}
