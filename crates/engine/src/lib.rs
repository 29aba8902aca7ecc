//! Game loop scheduling.
//!
//! The engine itself knows nothing about time. [`GameLoop`] owns it and turns
//! elapsed wall-clock milliseconds into ticks: one tick each time the current
//! speed interval has fully elapsed. Input commands are forwarded between
//! ticks. Everything runs on the caller's thread, one callback at a time.

pub mod game_loop;

pub use webtris_core as core;
pub use webtris_types as types;

pub use game_loop::GameLoop;
