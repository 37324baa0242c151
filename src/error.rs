//! Crate error type
//!
//! Errors are configuration or lifecycle failures. Frame ticks and flaps are
//! total over valid state and never produce one.

use std::fmt;

use crate::sim::GamePhase;

#[derive(Debug)]
pub enum GameError {
    /// Field too short to fit the minimum gap plus both margins
    InfeasibleGeometry { field_height: f32, required: f32 },
    /// A setting is out of its valid range
    InvalidSetting { name: &'static str, reason: String },
    /// `start()` called while a session is counting down or running
    SessionActive(GamePhase),
    /// Settings JSON failed to parse
    Config(serde_json::Error),
    /// Settings file could not be read
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InfeasibleGeometry {
                field_height,
                required,
            } => write!(
                f,
                "infeasible field geometry: height {field_height} < {required} needed for minimum gap and margins"
            ),
            GameError::InvalidSetting { name, reason } => {
                write!(f, "invalid setting `{name}`: {reason}")
            }
            GameError::SessionActive(phase) => {
                write!(f, "cannot start: session already {}", phase.as_str())
            }
            GameError::Config(e) => write!(f, "settings parse error: {e}"),
            GameError::Io(e) => write!(f, "settings read error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
