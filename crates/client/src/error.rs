//! Client-side error types.
//!
//! [`ProtocolError`] covers the text framing of the input stream; everything
//! past framing (grid symbols, entity parameters) is validated by
//! `game-core` and arrives here wrapped in a [`RuntimeError`].
use std::io;

use game_core::{ErrorSeverity, GameError};
use runtime::RuntimeError;
use thiserror::Error;

/// Malformed or truncated protocol input.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to read protocol input")]
    Io(#[from] io::Error),

    /// Input ended in the middle of a handshake or turn.
    #[error("input ended while reading {expected}")]
    Truncated { expected: &'static str },

    /// A line has the wrong number of whitespace-separated fields.
    #[error("{what} line {line:?} has {actual} fields, expected {expected}")]
    FieldCount {
        what: &'static str,
        line: String,
        expected: usize,
        actual: usize,
    },

    /// A field is not a valid number for its slot.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl ProtocolError {
    /// True when the input stream stopped early rather than carrying bad data.
    pub fn is_truncation(&self) -> bool {
        matches!(self, ProtocolError::Truncated { .. })
    }
}

impl GameError for ProtocolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ProtocolError::Io(_) | ProtocolError::Truncated { .. } => ErrorSeverity::Fatal,
            ProtocolError::FieldCount { .. } | ProtocolError::InvalidNumber { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::Io(_) => "PROTOCOL_IO",
            ProtocolError::Truncated { .. } => "PROTOCOL_TRUNCATED",
            ProtocolError::FieldCount { .. } => "PROTOCOL_FIELD_COUNT",
            ProtocolError::InvalidNumber { .. } => "PROTOCOL_INVALID_NUMBER",
        }
    }
}

/// Anything that ends a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to write command")]
    Output(#[source] io::Error),
}

impl GameError for ClientError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Protocol(inner) => inner.severity(),
            ClientError::Runtime(inner) => inner.severity(),
            ClientError::Output(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ClientError::Protocol(inner) => inner.error_code(),
            ClientError::Runtime(inner) => inner.error_code(),
            ClientError::Output(_) => "CLIENT_OUTPUT",
        }
    }
}
