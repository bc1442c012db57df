use super::{AgentId, CellType, Position};

/// A bomb-laying agent. Exactly one agent per turn is "self".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    pub bombs_available: u32,
    pub explosion_range: u32,
}

impl Agent {
    pub fn new(id: AgentId, position: Position, bombs_available: u32, explosion_range: u32) -> Self {
        Self {
            id,
            position,
            bombs_available,
            explosion_range,
        }
    }

    /// The bomb this agent would drop at `position` with a fresh countdown.
    pub fn create_bomb(&self, position: Position, countdown: u32) -> Bomb {
        Bomb::new(self.id, position, countdown, self.explosion_range)
    }
}

/// A placed bomb. Timers arrive already decremented every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bomb {
    pub owner: AgentId,
    pub position: Position,
    /// Turns until the bomb explodes on its own.
    pub timer: u32,
    /// Cells reached along each axis, the bomb's own cell included.
    pub explosion_range: u32,
}

impl Bomb {
    pub fn new(owner: AgentId, position: Position, timer: u32, explosion_range: u32) -> Self {
        Self {
            owner,
            position,
            timer,
            explosion_range,
        }
    }
}

/// Collectable dropped by some boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BonusKind {
    ExtraRange,
    ExtraBomb,
}

impl BonusKind {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(BonusKind::ExtraRange),
            2 => Some(BonusKind::ExtraBomb),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            BonusKind::ExtraRange => 1,
            BonusKind::ExtraBomb => 2,
        }
    }

    /// Cell type a bonus of this kind turns its floor cell into.
    pub const fn cell_type(self) -> CellType {
        match self {
            BonusKind::ExtraRange => CellType::BonusRange,
            BonusKind::ExtraBomb => CellType::BonusBomb,
        }
    }
}
