use serde::Serialize;

use crate::types::{Cell, Phase, GRID_HEIGHT, GRID_WIDTH};

pub type SnapshotCells = [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

/// Read-only view handed to the presentation layer after every mutation.
///
/// `cells` is the locked grid with the active piece composited on top, border
/// included, so a renderer can draw it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub cells: SnapshotCells,
    pub score: u32,
    pub speed_ms: u32,
    pub lines: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.score = 0;
        self.speed_ms = 0;
        self.lines = 0;
        self.phase = Phase::Spawning;
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Cell at `(row, col)` in bordered coordinates
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[Cell::Empty; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            score: 0,
            speed_ms: 0,
            lines: 0,
            phase: Phase::Spawning,
        };
        s.clear();
        s
    }
}
