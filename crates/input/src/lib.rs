//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]s plus the two
//! shell signals the engine never sees: restart and quit. There is no key
//! repeat handling; every press is one discrete command.

pub mod map;

pub use webtris_types as types;

pub use map::{handle_key_event, is_restart, map_key, should_quit, InputEvent};
