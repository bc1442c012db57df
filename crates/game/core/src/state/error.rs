//! Snapshot ingestion errors.
//!
//! Every turn snapshot is validated as a whole before any per-cell map is
//! built from it; a single bad row or record rejects the turn.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AgentId, Position};

/// Input-contract violations detected while building a [`WorldState`].
///
/// [`WorldState`]: crate::state::WorldState
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The handshake announced a zero-sized board.
    #[error("Grid dimensions must be positive (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    /// Number of grid rows differs from the handshake height.
    #[error("Expected {expected} grid rows, got {actual}")]
    RowCount { expected: u32, actual: usize },

    /// A grid row is not exactly `width` symbols long.
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: u32,
        actual: usize,
    },

    /// A grid row contains a symbol outside the protocol alphabet.
    #[error("Unknown grid symbol {symbol:?} at {position}")]
    UnknownSymbol { position: Position, symbol: char },

    /// Entity record with a type code other than agent, bomb, or bonus.
    #[error("Entity record {index} has unknown kind {code}")]
    UnknownEntityKind { index: usize, code: i32 },

    /// Entity record positioned outside the grid.
    #[error("Entity record {index} at {position} lies outside the grid")]
    OutOfBounds { index: usize, position: Position },

    /// Negative count/range, or a bomb timer that already ran out.
    #[error("Entity record {index} has invalid {name} = {value}")]
    InvalidParameter {
        index: usize,
        name: &'static str,
        value: i32,
    },

    /// Bonus record with an unknown bonus type code.
    #[error("Entity record {index} has unknown bonus code {code}")]
    UnknownBonus { index: usize, code: i32 },

    /// No agent record is owned by the controlled agent.
    #[error("No agent record for self {id}")]
    MissingSelf { id: AgentId },

    /// Two agent records share the same owner.
    #[error("Agent {id} appears more than once")]
    DuplicateAgent { id: AgentId },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            EmptyGrid { .. } => "SNAPSHOT_EMPTY_GRID",
            RowCount { .. } => "SNAPSHOT_ROW_COUNT",
            RowWidth { .. } => "SNAPSHOT_ROW_WIDTH",
            UnknownSymbol { .. } => "SNAPSHOT_UNKNOWN_SYMBOL",
            UnknownEntityKind { .. } => "SNAPSHOT_UNKNOWN_ENTITY_KIND",
            OutOfBounds { .. } => "SNAPSHOT_OUT_OF_BOUNDS",
            InvalidParameter { .. } => "SNAPSHOT_INVALID_PARAMETER",
            UnknownBonus { .. } => "SNAPSHOT_UNKNOWN_BONUS",
            MissingSelf { .. } => "SNAPSHOT_MISSING_SELF",
            DuplicateAgent { .. } => "SNAPSHOT_DUPLICATE_AGENT",
        }
    }
}
