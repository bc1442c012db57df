//! Utility scoring of a single cell.

use super::Safety;
use crate::explosion::ExplosionForecast;
use crate::state::{Direction, Grid, Position};

/// Flat reward for standing on a bonus.
pub const BONUS_REWARD: u32 = 3;
/// Reward for a bonus that a pending blast is about to destroy.
pub const DOOMED_BONUS_REWARD: u32 = 1;

/// Weighted count of crates a bomb dropped at `position` with `range` would
/// hit. Cells already slated for destruction are see-through and worth
/// nothing; any other blast blocker ends the axis.
pub fn crates_in_reach(
    grid: &Grid,
    forecast: &ExplosionForecast,
    position: Position,
    range: u32,
) -> u32 {
    let mut total = 0;
    for direction in Direction::ALL {
        let mut cursor = position;
        for _ in 1..range {
            cursor = cursor.step(direction);
            let Some(cell) = grid.get(cursor) else {
                break;
            };
            if forecast.is_doomed(cursor) {
                continue;
            }
            if cell.blocks_explosion() {
                total += cell.crate_weight();
                break;
            }
        }
    }
    total
}

/// Utility of moving to (and possibly bombing from) `position`.
pub fn score(
    grid: &Grid,
    forecast: &ExplosionForecast,
    position: Position,
    range: u32,
    safety: Safety,
) -> u32 {
    let Some(cell) = grid.get(position) else {
        return 0;
    };

    let mut value = 0i64;
    if cell.is_passable() {
        value += i64::from(crates_in_reach(grid, forecast, position, range));
        value -= i64::from(safety.penalty());
    }
    if cell.is_bonus() {
        value += i64::from(if forecast.is_doomed(position) {
            DOOMED_BONUS_REWARD
        } else {
            BONUS_REWARD
        });
    }
    value.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentId, Bomb, CellType};

    #[test]
    fn counts_first_crate_per_axis() {
        let grid = Grid::from_symbols(&["0.1.0", ".....", "2.X.."]).unwrap();
        let forecast = ExplosionForecast::quiet(&grid);
        let centre = Position::new(2, 1);

        // Range 2 reaches (2,0) which is a bonus box, and the wall below.
        assert_eq!(crates_in_reach(&grid, &forecast, centre, 2), 2);
        assert_eq!(crates_in_reach(&grid, &forecast, Position::new(0, 1), 2), 1 + 2);
        // From the corner both axes end at a box carrying a bonus.
        assert_eq!(crates_in_reach(&grid, &forecast, Position::ORIGIN, 5), 2 + 2);
    }

    #[test]
    fn doomed_crates_are_transparent() {
        let mut grid = Grid::from_symbols(&["0.0.0"]).unwrap();
        let bomb = Bomb::new(AgentId(1), Position::new(3, 0), 5, 2);
        grid.set(bomb.position, CellType::BombOccupied);
        let forecast = ExplosionForecast::propagate(&grid, &[bomb]);
        assert!(forecast.is_doomed(Position::new(2, 0)));

        // From (1,0) eastwards the doomed box is skipped and the bomb stops the sweep.
        assert_eq!(crates_in_reach(&grid, &forecast, Position::new(1, 0), 4), 1);
    }

    #[test]
    fn bonus_reward_and_penalty() {
        let mut grid = Grid::from_symbols(&["..."]).unwrap();
        grid.set(Position::new(1, 0), CellType::BonusBomb);
        let forecast = ExplosionForecast::quiet(&grid);

        let bonus = Position::new(1, 0);
        assert_eq!(score(&grid, &forecast, bonus, 3, Safety::Unthreatened), 3);
        assert_eq!(score(&grid, &forecast, bonus, 3, Safety::ExplodesIn(6)), 2);
        assert_eq!(score(&grid, &forecast, Position::ORIGIN, 3, Safety::Lethal), 0);
    }
}
