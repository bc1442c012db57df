//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from snapshot ingestion and runtime construction so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ErrorSeverity, GameError, SnapshotError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a handshake before building")]
    MissingHandshake,

    #[error("rejected turn snapshot")]
    Snapshot(#[from] SnapshotError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingHandshake => ErrorSeverity::Internal,
            RuntimeError::Snapshot(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingHandshake => "RUNTIME_MISSING_HANDSHAKE",
            RuntimeError::Snapshot(inner) => inner.error_code(),
        }
    }
}
