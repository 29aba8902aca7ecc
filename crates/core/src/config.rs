//! Engine configuration
//!
//! Every field has a default taken from `webtris_types`, so a partial JSON
//! document (or none at all) yields a usable config.

use serde::{Deserialize, Serialize};

use crate::error::InitializationError;
use crate::types::{
    DEFAULT_SPEED_MS, HARD_DROP_BONUS, HARD_DROP_SPEEDUP_MS, LINE_SCORE, LINE_SPEEDUP_MS,
    MIN_SPEED_MS,
};

/// What happens when a rotation leaves the piece in an illegal position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Reject the rotation and keep the previous shape
    #[default]
    Revert,
    /// Keep the rotated shape even if it overlaps or leaves the playfield
    Unchecked,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "revert" => Some(RotationPolicy::Revert),
            "unchecked" => Some(RotationPolicy::Unchecked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tick interval at the start of a session
    pub initial_speed_ms: u32,
    /// Floor for the tick interval; speed-ups never go below it
    pub min_speed_ms: u32,
    pub hard_drop_bonus: u32,
    pub hard_drop_speedup_ms: u32,
    /// Score per cleared line
    pub line_score: u32,
    /// Tick interval reduction per cleared line
    pub line_speedup_ms: u32,
    pub rotation: RotationPolicy,
    /// Seed for the default random shape source; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: DEFAULT_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            hard_drop_bonus: HARD_DROP_BONUS,
            hard_drop_speedup_ms: HARD_DROP_SPEEDUP_MS,
            line_score: LINE_SCORE,
            line_speedup_ms: LINE_SPEEDUP_MS,
            rotation: RotationPolicy::Revert,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.min_speed_ms == 0 {
            return Err(InitializationError::InvalidConfig(
                "min_speed_ms must be greater than zero",
            ));
        }
        if self.initial_speed_ms < self.min_speed_ms {
            return Err(InitializationError::InvalidConfig(
                "initial_speed_ms must not be below min_speed_ms",
            ));
        }
        Ok(())
    }
}
