use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Safety, utility};
use crate::explosion::ExplosionForecast;
use crate::map::CellMap;
use crate::state::{CellType, Grid, Position, WorldState};

/// Shortest-path bookkeeping of a reached cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathEntry {
    pub distance: u32,
    /// Previous cell on a shortest path; `None` only at the origin.
    pub predecessor: Option<Position>,
}

/// Result of one single-source search: distance, predecessor, safety and
/// utility for every cell, computed together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchField {
    origin: Position,
    paths: CellMap<Option<PathEntry>>,
    safety: CellMap<Safety>,
    utility: CellMap<u32>,
}

impl SearchField {
    /// Searches from the controlled agent's cell with its own blast range.
    pub fn for_agent(world: &WorldState, forecast: &ExplosionForecast) -> Self {
        Self::solve(
            &world.grid,
            forecast,
            world.me.position,
            world.me.explosion_range,
        )
    }

    /// Runs the combined search from `origin`.
    ///
    /// A cell is entered only when the new distance improves on the recorded
    /// one. Arriving exactly when its blast lands marks it [`Safety::Lethal`]
    /// and the search does not continue through it. Utility is scored once per
    /// cell as it is settled; bomb cells are never scored.
    pub fn solve(
        grid: &Grid,
        forecast: &ExplosionForecast,
        origin: Position,
        range: u32,
    ) -> Self {
        Self::solve_delayed(grid, forecast, origin, range, 0)
    }

    /// Like [`solve`](Self::solve) for an agent that only stands on `origin`
    /// after `departure` turns.
    ///
    /// Distances and paths stay relative to `origin`; safety is judged at
    /// `departure + distance` turns from now.
    pub fn solve_delayed(
        grid: &Grid,
        forecast: &ExplosionForecast,
        origin: Position,
        range: u32,
        departure: u32,
    ) -> Self {
        let mut field = Self {
            origin,
            paths: CellMap::new(grid, None),
            safety: CellMap::new(grid, Safety::Lethal),
            utility: CellMap::new(grid, 0),
        };
        let Some(start) = grid.index(origin) else {
            return field;
        };

        let mut settled = CellMap::new(grid, false);
        let mut open = BinaryHeap::<Reverse<(u32, usize)>>::new();
        field.paths[start] = Some(PathEntry {
            distance: 0,
            predecessor: None,
        });
        field.safety[start] = Safety::on_arrival(forecast.time(origin), departure);
        open.push(Reverse((0, start)));

        while let Some(Reverse((distance, index))) = open.pop() {
            if settled[index] || field.paths[index].map(|entry| entry.distance) != Some(distance) {
                continue;
            }
            settled[index] = true;

            let position = grid.position(index);
            if grid.get(position) != Some(CellType::BombOccupied) {
                field.utility[index] =
                    utility::score(grid, forecast, position, range, field.safety[index]);
            }

            let next_distance = distance + 1;
            for next in grid.neighbors(position) {
                let Some(next_index) = grid.index(next) else {
                    continue;
                };
                let passable = grid.get(next).is_some_and(CellType::is_passable);
                if !passable || settled[next_index] {
                    continue;
                }
                if field.paths[next_index].is_some_and(|entry| entry.distance <= next_distance) {
                    continue;
                }

                let safety = Safety::on_arrival(forecast.time(next), departure + next_distance);
                if safety.is_lethal() {
                    field.safety[next_index] = Safety::Lethal;
                    continue;
                }
                field.paths[next_index] = Some(PathEntry {
                    distance: next_distance,
                    predecessor: Some(position),
                });
                field.safety[next_index] = safety;
                open.push(Reverse((next_distance, next_index)));
            }
        }

        field
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn entry(&self, position: Position) -> Option<PathEntry> {
        self.paths.get(position).copied().flatten()
    }

    pub fn distance(&self, position: Position) -> Option<u32> {
        self.entry(position).map(|entry| entry.distance)
    }

    pub fn is_reachable(&self, position: Position) -> bool {
        self.entry(position).is_some()
    }

    /// Safety on arrival; cells outside the grid are `Lethal`.
    pub fn safety(&self, position: Position) -> Safety {
        self.safety.get(position).copied().unwrap_or_default()
    }

    pub fn utility(&self, position: Position) -> u32 {
        self.utility.get(position).copied().unwrap_or(0)
    }

    /// Zeroes the utility of `position` so later selections skip it.
    pub fn suppress(&mut self, position: Position) {
        self.utility.set(position, 0);
    }

    /// Reached cells with their path entries, row-major.
    pub fn reachable(&self) -> impl Iterator<Item = (Position, PathEntry)> + '_ {
        self.paths
            .iter()
            .filter_map(|(position, entry)| entry.map(|entry| (position, entry)))
    }

    /// Number of reached cells an agent can stand on indefinitely.
    pub fn unthreatened_count(&self) -> usize {
        self.reachable()
            .filter(|&(position, _)| self.safety(position).is_unthreatened())
            .count()
    }

    /// Closest reached cell satisfying `accept`, ties by row-major index.
    pub fn nearest(&self, mut accept: impl FnMut(Position) -> bool) -> Option<Position> {
        self.reachable()
            .filter(|&(position, _)| accept(position))
            .min_by_key(|&(_, entry)| entry.distance)
            .map(|(position, _)| position)
    }

    /// Cells to walk from the origin to `target`, origin excluded.
    ///
    /// Empty if `target` is the origin or was never reached.
    pub fn path_to(&self, target: Position) -> Vec<Position> {
        let mut path = Vec::new();
        let mut cursor = target;
        while let Some(PathEntry {
            predecessor: Some(previous),
            ..
        }) = self.entry(cursor)
        {
            path.push(cursor);
            if path.len() > self.paths.len() {
                return Vec::new();
            }
            cursor = previous;
        }
        if cursor != self.origin {
            return Vec::new();
        }
        path.reverse();
        path
    }

    pub fn safety_map(&self) -> &CellMap<Safety> {
        &self.safety
    }

    pub fn utility_map(&self) -> &CellMap<u32> {
        &self.utility
    }

    pub fn path_map(&self) -> &CellMap<Option<PathEntry>> {
        &self.paths
    }
}
