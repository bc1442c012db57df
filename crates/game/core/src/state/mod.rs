//! Authoritative per-turn world model.
//!
//! This module owns the cell taxonomy, the grid, the agent and bomb records
//! and the raw snapshot types they are built from. Everything here is
//! rebuilt from scratch on every turn; derived maps borrow it read-only.
mod error;
mod snapshot;
pub mod types;

pub use error::SnapshotError;
pub use snapshot::{EntityKind, EntityRecord, Handshake, TurnSnapshot};
pub use types::{
    Agent, AgentId, Bomb, BonusKind, CellGroup, CellType, Direction, Grid, Neighbors, Position,
    WorldState,
};
