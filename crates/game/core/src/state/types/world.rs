use std::collections::BTreeMap;

use super::{Agent, AgentId, Bomb, BonusKind, CellType, Grid, Position};
use crate::state::{EntityKind, Handshake, SnapshotError, TurnSnapshot};

/// Everything the engine knows about the board for one turn.
///
/// Rebuilt wholesale from every snapshot; nothing here survives a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Static cell types with bonuses and bombs overlaid.
    pub grid: Grid,
    /// The controlled agent.
    pub me: Agent,
    /// Every other agent, keyed by owner id.
    pub others: BTreeMap<AgentId, Agent>,
    /// Active bombs in record order.
    pub bombs: Vec<Bomb>,
}

impl WorldState {
    pub fn new(grid: Grid, me: Agent) -> Self {
        Self {
            grid,
            me,
            others: BTreeMap::new(),
            bombs: Vec::new(),
        }
    }

    /// Validates a raw snapshot and builds the turn's world model.
    ///
    /// Bonus records turn their cell into `BonusRange`/`BonusBomb`, bomb
    /// records into `BombOccupied`. The whole snapshot is rejected on the
    /// first violation.
    pub fn from_snapshot(
        handshake: &Handshake,
        snapshot: &TurnSnapshot,
    ) -> Result<Self, SnapshotError> {
        let Handshake {
            width,
            height,
            self_id,
        } = *handshake;

        let mut grid = parse_rows(width, height, &snapshot.rows)?;
        let mut me = None;
        let mut others = BTreeMap::new();
        let mut bombs = Vec::new();

        for (index, record) in snapshot.entities.iter().enumerate() {
            let kind = EntityKind::from_code(record.kind).ok_or(SnapshotError::UnknownEntityKind {
                index,
                code: record.kind,
            })?;
            if !grid.contains(record.position) {
                return Err(SnapshotError::OutOfBounds {
                    index,
                    position: record.position,
                });
            }

            match kind {
                EntityKind::Agent => {
                    let agent = Agent::new(
                        record.owner,
                        record.position,
                        at_least(index, "bombs_available", record.param1, 0)?,
                        at_least(index, "explosion_range", record.param2, 0)?,
                    );
                    let duplicate = if record.owner == self_id {
                        me.replace(agent).is_some()
                    } else {
                        others.insert(record.owner, agent).is_some()
                    };
                    if duplicate {
                        return Err(SnapshotError::DuplicateAgent { id: record.owner });
                    }
                }
                EntityKind::Bomb => {
                    let bomb = Bomb::new(
                        record.owner,
                        record.position,
                        at_least(index, "timer", record.param1, 1)?,
                        at_least(index, "explosion_range", record.param2, 0)?,
                    );
                    grid.set(bomb.position, CellType::BombOccupied);
                    bombs.push(bomb);
                }
                EntityKind::Bonus => {
                    let bonus = BonusKind::from_code(record.param1).ok_or(
                        SnapshotError::UnknownBonus {
                            index,
                            code: record.param1,
                        },
                    )?;
                    grid.set(record.position, bonus.cell_type());
                }
            }
        }

        let me = me.ok_or(SnapshotError::MissingSelf { id: self_id })?;
        Ok(Self {
            grid,
            me,
            others,
            bombs,
        })
    }

    /// Adds a bomb and marks its cell as occupied.
    pub fn add_bomb(&mut self, bomb: Bomb) {
        self.grid.set(bomb.position, CellType::BombOccupied);
        self.bombs.push(bomb);
    }

    /// Copy of this world with `bomb` added; `self` is left untouched.
    pub fn with_bomb(&self, bomb: Bomb) -> Self {
        let mut hypothetical = self.clone();
        hypothetical.add_bomb(bomb);
        hypothetical
    }

    pub fn bomb_at(&self, position: Position) -> Option<&Bomb> {
        self.bombs.iter().find(|bomb| bomb.position == position)
    }
}

fn parse_rows(width: u32, height: u32, rows: &[String]) -> Result<Grid, SnapshotError> {
    if width == 0 || height == 0 {
        return Err(SnapshotError::EmptyGrid { width, height });
    }
    if rows.len() != height as usize {
        return Err(SnapshotError::RowCount {
            expected: height,
            actual: rows.len(),
        });
    }

    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for (y, row) in rows.iter().enumerate() {
        let actual = row.chars().count();
        if actual != width as usize {
            return Err(SnapshotError::RowWidth {
                row: y,
                expected: width,
                actual,
            });
        }
        for (x, symbol) in row.chars().enumerate() {
            // Bonus and bomb symbols are overlays; the protocol never sends them.
            let cell = CellType::from_symbol(symbol)
                .filter(|cell| !cell.is_bonus() && *cell != CellType::BombOccupied)
                .ok_or(SnapshotError::UnknownSymbol {
                    position: Position::new(x as i32, y as i32),
                    symbol,
                })?;
            cells.push(cell);
        }
    }
    Ok(Grid::from_cells(width, height, cells))
}

fn at_least(index: usize, name: &'static str, value: i32, min: i32) -> Result<u32, SnapshotError> {
    if value < min {
        return Err(SnapshotError::InvalidParameter { index, name, value });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::state::EntityRecord;

    fn handshake() -> Handshake {
        Handshake::new(3, 2, AgentId(0))
    }

    #[test]
    fn overlays_bonus_and_bomb_records() {
        let snapshot = TurnSnapshot::from_rows(
            &["...", ".0X"],
            vec![
                EntityRecord::agent(0, 0, 0, 1, 3),
                EntityRecord::agent(1, 2, 0, 0, 2),
                EntityRecord::bomb(1, 1, 0, 5, 2),
                EntityRecord::bonus(0, 1, 2),
            ],
        );
        let world = WorldState::from_snapshot(&handshake(), &snapshot).unwrap();

        assert_eq!(world.me.position, Position::ORIGIN);
        assert_eq!(world.me.explosion_range, 3);
        assert_eq!(world.others.len(), 1);
        assert_eq!(world.grid.render(), ".*.\nB0X\n");
        assert_eq!(world.bomb_at(Position::new(1, 0)).map(|b| b.timer), Some(5));
    }

    #[test]
    fn rejects_malformed_snapshots() {
        let agent = EntityRecord::agent(0, 0, 0, 1, 3);
        let cases = [
            (TurnSnapshot::from_rows(&["..."], vec![agent]), "SNAPSHOT_ROW_COUNT"),
            (TurnSnapshot::from_rows(&["...", ".."], vec![agent]), "SNAPSHOT_ROW_WIDTH"),
            (TurnSnapshot::from_rows(&["...", "..*"], vec![agent]), "SNAPSHOT_UNKNOWN_SYMBOL"),
            (TurnSnapshot::from_rows(&["...", "..."], vec![]), "SNAPSHOT_MISSING_SELF"),
            (
                TurnSnapshot::from_rows(&["...", "..."], vec![agent, agent]),
                "SNAPSHOT_DUPLICATE_AGENT",
            ),
            (
                TurnSnapshot::from_rows(&["...", "..."], vec![agent, EntityRecord::bomb(0, 3, 0, 4, 2)]),
                "SNAPSHOT_OUT_OF_BOUNDS",
            ),
            (
                TurnSnapshot::from_rows(&["...", "..."], vec![agent, EntityRecord::bomb(0, 1, 0, 0, 2)]),
                "SNAPSHOT_INVALID_PARAMETER",
            ),
            (
                TurnSnapshot::from_rows(&["...", "..."], vec![agent, EntityRecord::bonus(1, 1, 7)]),
                "SNAPSHOT_UNKNOWN_BONUS",
            ),
            (
                TurnSnapshot::from_rows(
                    &["...", "..."],
                    vec![agent, EntityRecord { kind: 9, ..agent }],
                ),
                "SNAPSHOT_UNKNOWN_ENTITY_KIND",
            ),
        ];

        for (snapshot, code) in cases {
            let err = WorldState::from_snapshot(&handshake(), &snapshot).unwrap_err();
            assert_eq!(err.error_code(), code, "{err}");
        }
    }

    #[test]
    fn with_bomb_leaves_world_untouched() {
        let world = WorldState::new(Grid::new(3, 3), Agent::new(AgentId(0), Position::new(1, 1), 1, 2));
        let bomb = world.me.create_bomb(world.me.position, 8);
        let hypothetical = world.with_bomb(bomb);

        assert!(world.bombs.is_empty());
        assert_eq!(world.grid.get(Position::new(1, 1)), Some(CellType::Floor));
        assert_eq!(hypothetical.bombs, vec![bomb]);
        assert_eq!(hypothetical.grid.get(Position::new(1, 1)), Some(CellType::BombOccupied));
    }
}
