//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond conversions, making them
//! usable in any context (engine rules, terminal rendering, config loading).
//!
//! # Grid Dimensions
//!
//! The playfield is 10 columns by 20 rows, wrapped in a one-cell border frame:
//!
//! - **Playfield**: rows `1..=20`, columns `1..=10`
//! - **Physical grid**: 22 rows x 12 columns (border included)
//! - **Spawn row**: `y = 1`, horizontally centered
//!
//! # Timing and Scoring Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_SPEED_MS` | 500 | Initial tick interval |
//! | `MIN_SPEED_MS` | 100 | Default floor for the tick interval |
//! | `HARD_DROP_BONUS` | 5 | Points awarded per hard drop |
//! | `HARD_DROP_SPEEDUP_MS` | 5 | Interval reduction per hard drop |
//! | `LINE_SCORE` | 10 | Points per cleared line |
//! | `LINE_SPEEDUP_MS` | 10 | Interval reduction per cleared line |
//!
//! # Examples
//!
//! ```
//! use webtris_types::{Cell, GameCommand, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_color_id(3), Some(PieceKind::T));
//! assert_eq!(Cell::Locked(PieceKind::T).code(), 3);
//! assert_eq!(Cell::Border.code(), -1);
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Playfield width in cells (10 columns)
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Playfield height in cells (20 rows)
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Physical grid width including the left and right border columns
pub const GRID_WIDTH: u8 = PLAYFIELD_WIDTH + 2;

/// Physical grid height including the top and bottom border rows
pub const GRID_HEIGHT: u8 = PLAYFIELD_HEIGHT + 2;

/// Row every new piece spawns on (first interior row)
pub const SPAWN_Y: i8 = 1;

/// Initial tick interval in milliseconds
pub const DEFAULT_SPEED_MS: u32 = 500;

/// Default floor for the tick interval in milliseconds
pub const MIN_SPEED_MS: u32 = 100;

/// Score bonus for a hard drop
pub const HARD_DROP_BONUS: u32 = 5;

/// Tick interval reduction for a hard drop
pub const HARD_DROP_SPEEDUP_MS: u32 = 5;

/// Score per cleared line
pub const LINE_SCORE: u32 = 10;

/// Tick interval reduction per cleared line
pub const LINE_SPEEDUP_MS: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_playfield_plus_border() {
        assert_eq!(GRID_WIDTH, 12);
        assert_eq!(GRID_HEIGHT, 22);
        assert_eq!(SPAWN_Y, 1);
    }

    #[test]
    fn color_ids_round_trip_for_every_kind() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i + 1);
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_color_id(0), None);
        assert_eq!(PieceKind::from_color_id(8), None);
    }

    #[test]
    fn cell_codes() {
        assert_eq!(Cell::Empty.code(), 0);
        assert_eq!(Cell::Border.code(), -1);
        assert_eq!(Cell::Locked(PieceKind::L).code(), 7);
        assert_eq!(Cell::from_code(-1), Some(Cell::Border));
        assert_eq!(Cell::from_code(0), Some(Cell::Empty));
        assert_eq!(Cell::from_code(2), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(Cell::from_code(9), None);
    }
}

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color id used by the grid and the renderer:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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
    /// All kinds in color-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color id in `1..=7`
    pub fn color_id(&self) -> u8 {
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

    /// Inverse of [`PieceKind::color_id`]
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use webtris_types::PieceKind;
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
}

/// A cell of the bordered grid
///
/// Serialized as its numeric code: `0` empty, `-1` border, `1..=7` locked color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i8")]
pub enum Cell {
    #[default]
    Empty,
    Border,
    Locked(PieceKind),
}

impl Cell {
    pub fn code(&self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Border => -1,
            Cell::Locked(kind) => kind.color_id() as i8,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            -1 => Some(Cell::Border),
            1..=7 => PieceKind::from_color_id(code as u8).map(Cell::Locked),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_border(&self) -> bool {
        matches!(self, Cell::Border)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Cell::Locked(_))
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

/// Discrete commands the presentation layer feeds to the engine
///
/// Restart and quit are not engine commands; the shell handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks it when blocked)
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
}

impl GameCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use webtris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameCommand::MoveLeft),
            "moveright" | "right" => Some(GameCommand::MoveRight),
            "movedown" | "down" => Some(GameCommand::MoveDown),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" | "drop" => Some(GameCommand::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::MoveDown => "moveDown",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
        }
    }
}

/// Lifecycle of the active piece
///
/// `Falling → (blocked below) → Locking → Spawning → Falling`, or
/// `Spawning → GameOver` when the new piece does not fit. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Falling,
    Locking,
    Spawning,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::Spawning => "spawning",
            Phase::GameOver => "game_over",
        }
    }
}

/// Engine-side event describing the most recent lock, clear or game over.
///
/// Consumed by the presentation layer via `Engine::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastEvent {
    pub locked: bool,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub game_over: bool,
}
