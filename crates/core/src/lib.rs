//! Core game logic - pure, deterministic when seeded, and testable
//!
//! This crate holds every game rule. It has no dependency on terminals or
//! I/O; the only side channel is the `log` facade.
//!
//! # Module Structure
//!
//! - [`grid`]: 22x12 bordered grid, row completion and row removal
//! - [`piece`]: shape matrices, clockwise rotation, the movable piece
//! - [`rng`]: the [`ShapeSource`] seam for piece selection
//! - [`config`]: [`EngineConfig`] and the rotation policy
//! - [`engine`]: spawn, move, rotate, hard drop, line clears, the tick
//! - [`snapshot`]: read-only render view
//!
//! # Game Rules
//!
//! - Pieces spawn centered on the first interior row; a spawn that does not
//!   fit ends the game.
//! - Gravity moves the active piece one row per tick; when it cannot move
//!   down it locks into the grid and the next piece spawns.
//! - A tick that finds a locked cell in the topmost interior row ends the game.
//! - Hard drop: +5 score, tick interval -5ms.
//! - Each cleared line: +10 score, tick interval -10ms.
//! - The tick interval never drops below `EngineConfig::min_speed_ms`.
//!
//! # Example
//!
//! ```
//! use webtris_core::{Engine, EngineConfig, ScriptedShapes};
//! use webtris_core::types::{GameCommand, PieceKind};
//!
//! let mut engine = Engine::with_source(
//!     EngineConfig::default(),
//!     ScriptedShapes::new([PieceKind::I, PieceKind::O]),
//! )
//! .unwrap();
//!
//! engine.apply(GameCommand::MoveLeft);
//! engine.apply(GameCommand::HardDrop);
//! assert_eq!(engine.score(), 5);
//!
//! while engine.tick() {}
//! assert!(engine.is_game_over());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use webtris_types as types;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, RotationPolicy};
pub use engine::Engine;
pub use error::InitializationError;
pub use grid::Grid;
pub use piece::{Piece, Shape};
pub use rng::{RandomShapes, ScriptedShapes, ShapeSource};
pub use snapshot::GameSnapshot;
