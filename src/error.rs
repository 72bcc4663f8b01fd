//! Error types for the Seven Seals engine
//!
//! Player mistakes (illegal targets, occupied slots, commands out of phase)
//! are not errors. They are ignored with a log line. These variants cover
//! broken engine invariants, configuration and session plumbing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SealsError {
    #[error("Card not found: {0}")]
    CardNotFound(u32),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unrecognized command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Game session closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, SealsError>;
