//! Webtris (workspace facade crate).
//!
//! Re-exports the workspace crates as `webtris::{core,engine,input,term,types}`
//! and holds the binary's settings loader.

pub mod settings;

pub use webtris_core as core;
pub use webtris_engine as engine;
pub use webtris_input as input;
pub use webtris_term as term;
pub use webtris_types as types;
