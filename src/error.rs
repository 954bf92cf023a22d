//! Error taxonomy shared by persistence, the editor and the menus
//!
//! Nothing here is fatal: every variant is reported as a single line and
//! control returns to the current prompt.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The named record does not exist
    #[error("{name} not found")]
    NotFound { name: String },
    /// The record exists but could not be decoded
    #[error("{name}: line {line}: {reason}")]
    Parse {
        name: String,
        line: usize,
        reason: String,
    },
    /// Writing a record failed
    #[error("failed to write {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    /// Rejected editor coordinate, duplicate brick, unknown command...
    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidInput(msg.into())
    }

    /// One-line message shown to the player
    pub fn user_message(&self) -> String {
        match self {
            GameError::NotFound { name } | GameError::Parse { name, .. } => {
                format!("Failed to load {name}!")
            }
            GameError::Io { name, .. } => format!("Failed to save {name}!"),
            GameError::InvalidInput(msg) => msg.clone(),
        }
    }

    /// Missing and malformed records are treated the same by callers
    pub fn is_load_failure(&self) -> bool {
        matches!(self, GameError::NotFound { .. } | GameError::Parse { .. })
    }
}
