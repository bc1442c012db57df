//! Raw per-turn input as delivered by the turn protocol.
//!
//! These types carry unvalidated data; [`WorldState::from_snapshot`] is the
//! single place where they are checked and turned into the engine's model.
//!
//! [`WorldState::from_snapshot`]: crate::state::WorldState::from_snapshot

use super::{AgentId, Position};

/// Session parameters sent once before the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handshake {
    pub width: u32,
    pub height: u32,
    pub self_id: AgentId,
}

impl Handshake {
    pub fn new(width: u32, height: u32, self_id: AgentId) -> Self {
        Self {
            width,
            height,
            self_id,
        }
    }
}

/// Entity type codes of the turn protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    /// `param1` = bombs available, `param2` = explosion range.
    Agent,
    /// `param1` = turns until explosion, `param2` = explosion range.
    Bomb,
    /// `param1` = bonus type code.
    Bonus,
}

impl EntityKind {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EntityKind::Agent),
            1 => Some(EntityKind::Bomb),
            2 => Some(EntityKind::Bonus),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            EntityKind::Agent => 0,
            EntityKind::Bomb => 1,
            EntityKind::Bonus => 2,
        }
    }
}

/// One `type owner x y param1 param2` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRecord {
    pub kind: i32,
    pub owner: AgentId,
    pub position: Position,
    pub param1: i32,
    pub param2: i32,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, owner: i32, x: i32, y: i32, param1: i32, param2: i32) -> Self {
        Self {
            kind: kind.code(),
            owner: AgentId(owner),
            position: Position::new(x, y),
            param1,
            param2,
        }
    }

    pub fn agent(owner: i32, x: i32, y: i32, bombs: i32, range: i32) -> Self {
        Self::new(EntityKind::Agent, owner, x, y, bombs, range)
    }

    pub fn bomb(owner: i32, x: i32, y: i32, timer: i32, range: i32) -> Self {
        Self::new(EntityKind::Bomb, owner, x, y, timer, range)
    }

    pub fn bonus(x: i32, y: i32, code: i32) -> Self {
        Self::new(EntityKind::Bonus, 0, x, y, code, 0)
    }
}

/// Everything received for a single turn: grid rows and entity records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSnapshot {
    pub rows: Vec<String>,
    pub entities: Vec<EntityRecord>,
}

impl TurnSnapshot {
    pub fn new(rows: Vec<String>, entities: Vec<EntityRecord>) -> Self {
        Self { rows, entities }
    }

    /// Convenience constructor for string-literal rows.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], entities: Vec<EntityRecord>) -> Self {
        Self {
            rows: rows.iter().map(|row| row.as_ref().to_owned()).collect(),
            entities,
        }
    }
}
