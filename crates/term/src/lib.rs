//! Terminal presentation for the game.
//!
//! [`GameView`] turns a [`core::GameSnapshot`] into a framebuffer and
//! [`TerminalRenderer`] writes that framebuffer to the terminal. Nothing here
//! reads game state other than through the snapshot.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use webtris_core as core;
pub use webtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
