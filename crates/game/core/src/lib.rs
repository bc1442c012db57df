//! Deterministic world model and search primitives for the Boomer agent.
//!
//! `game-core` owns the per-turn board ([`state`]), the explosion timeline
//! ([`explosion`]) and the combined distance/safety/utility search
//! ([`search`]). Every API here is a pure function of the turn snapshot, so the
//! decision layers in `runtime` can rerun them freely for hypothetical boards.
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod explosion;
pub mod map;
pub mod search;
pub mod state;

pub use config::EngineConfig;
pub use error::{ErrorSeverity, GameError, SnapshotError};
pub use explosion::ExplosionForecast;
pub use map::CellMap;
pub use search::{PathEntry, Safety, SearchField};
pub use state::{
    Agent, AgentId, Bomb, BonusKind, CellGroup, CellType, Direction, EntityKind, EntityRecord,
    Grid, Handshake, Position, TurnSnapshot, WorldState,
};
