use std::fmt;

/// Failure to bring up an engine. Nothing can be played after this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationError {
    /// The configuration is inconsistent
    InvalidConfig(&'static str),
    /// The first piece does not fit on the starting grid
    SpawnBlocked,
}

impl InitializationError {
    pub fn code(self) -> &'static str {
        match self {
            InitializationError::InvalidConfig(_) => "invalid_config",
            InitializationError::SpawnBlocked => "spawn_blocked",
        }
    }
}

impl fmt::Display for InitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializationError::InvalidConfig(reason) => {
                write!(f, "invalid engine config: {}", reason)
            }
            InitializationError::SpawnBlocked => {
                write!(f, "cannot create a piece: spawn position is blocked")
            }
        }
    }
}

impl std::error::Error for InitializationError {}
