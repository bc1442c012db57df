//! Explosion timeline with chain reactions.
//!
//! [`ExplosionForecast::propagate`] answers "in how many turns does a blast
//! reach this cell" for every cell of the grid, given the bombs currently on
//! the board. Bombs caught by another blast detonate with that blast.

use crate::map::CellMap;
use crate::state::{Bomb, CellType, Direction, Grid, Position, WorldState};

/// Per-cell explosion times plus the set of cells the blasts will destroy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplosionForecast {
    /// Earliest turn count at which a blast reaches the cell; 0 = never.
    times: CellMap<u32>,
    /// Turn count at which a destructible cell is destroyed; 0 = survives.
    destroyed_at: CellMap<u32>,
}

impl ExplosionForecast {
    /// Forecast with no pending explosion anywhere.
    pub fn quiet(grid: &Grid) -> Self {
        Self {
            times: CellMap::new(grid, 0),
            destroyed_at: CellMap::new(grid, 0),
        }
    }

    /// Forecast for the bombs of `world`.
    pub fn for_world(world: &WorldState) -> Self {
        Self::propagate(&world.grid, &world.bombs)
    }

    /// Detonates `bombs` over `grid`.
    ///
    /// Bombs are swept in ascending effective trigger time: a bomb whose cell
    /// was already reached by an earlier blast goes off at that time instead of
    /// its own countdown. Ties keep input order. Positions must lie inside the
    /// grid (guaranteed by snapshot validation).
    pub fn propagate(grid: &Grid, bombs: &[Bomb]) -> Self {
        let mut forecast = Self::quiet(grid);
        let mut pending: Vec<&Bomb> = bombs.iter().collect();

        loop {
            let Some((slot, trigger)) = pending
                .iter()
                .enumerate()
                .map(|(slot, bomb)| (slot, forecast.trigger_time(bomb)))
                .min_by_key(|&(slot, trigger)| (trigger, slot))
            else {
                break;
            };
            let bomb = pending.remove(slot);
            forecast.sweep(grid, bomb, trigger);
        }

        forecast
    }

    fn trigger_time(&self, bomb: &Bomb) -> u32 {
        match self.times.get(bomb.position).copied() {
            Some(caught) if caught != 0 => caught.min(bomb.timer),
            _ => bomb.timer,
        }
    }

    fn sweep(&mut self, grid: &Grid, bomb: &Bomb, time: u32) {
        self.record(bomb.position, time);

        for direction in Direction::ALL {
            let mut position = bomb.position;
            for _ in 1..bomb.explosion_range {
                position = position.step(direction);
                let Some(cell) = grid.get(position) else {
                    break;
                };

                if !cell.blocks_explosion() {
                    self.record(position, time);
                    continue;
                }
                if cell.is_destructible() && self.destroyed_before(position, time) {
                    // Already blown away by an earlier blast.
                    continue;
                }
                if cell != CellType::Wall {
                    self.record(position, time);
                }
                if cell.is_destructible() {
                    if let Some(slot) = self.destroyed_at.get_mut(position) {
                        *slot = earliest(*slot, time);
                    }
                }
                break;
            }
        }
    }

    fn record(&mut self, position: Position, time: u32) {
        if let Some(slot) = self.times.get_mut(position) {
            *slot = earliest(*slot, time);
        }
    }

    fn destroyed_before(&self, position: Position, time: u32) -> bool {
        matches!(self.destroyed_at.get(position), Some(&at) if at != 0 && at < time)
    }

    /// Turns until a blast reaches `position`; 0 if none will.
    pub fn time(&self, position: Position) -> u32 {
        self.times.get(position).copied().unwrap_or(0)
    }

    pub fn is_threatened(&self, position: Position) -> bool {
        self.time(position) != 0
    }

    /// Whether a blast will destroy the (destructible) cell at `position`.
    pub fn is_doomed(&self, position: Position) -> bool {
        self.destroyed_at.get(position).is_some_and(|&at| at != 0)
    }

    /// Cells slated for destruction, row-major.
    pub fn doomed(&self) -> impl Iterator<Item = Position> + '_ {
        self.destroyed_at
            .iter()
            .filter(|&(_, &at)| at != 0)
            .map(|(position, _)| position)
    }

    pub fn times(&self) -> &CellMap<u32> {
        &self.times
    }
}

/// `min` where 0 means "unset".
#[inline]
fn earliest(current: u32, candidate: u32) -> u32 {
    if current == 0 { candidate } else { current.min(candidate) }
}
