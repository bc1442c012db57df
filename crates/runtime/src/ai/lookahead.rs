//! One-ply "what if I bomb here" modeling.
//!
//! The lookahead clones the world, drops a hypothetical bomb, and reruns the
//! explosion forecast and the search. The real world is never touched.

use std::cmp::Reverse;

use game_core::{ExplosionForecast, Position, SearchField, WorldState};
use tracing::debug;

use super::TurnContext;

/// Outcome of a successful bomb verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BombPlan {
    pub site: Position,
    /// Neighbour to step to right after bombing, when retreat lookahead is on.
    pub retreat: Option<Position>,
    /// Unthreatened cells reachable from the site after the bomb is placed.
    pub safe_cells: usize,
}

pub struct Lookahead;

impl Lookahead {
    /// World with the agent's bomb dropped on `site`.
    pub fn hypothetical(ctx: &TurnContext, site: Position) -> WorldState {
        let bomb = ctx.me().create_bomb(site, ctx.config.bomb_countdown);
        ctx.world.with_bomb(bomb)
    }

    /// Checks that bombing `site` leaves somewhere safe to go.
    ///
    /// Returns `None` if no reachable cell stays unthreatened, or (with retreat
    /// lookahead enabled) if no neighbour of the site offers a way out.
    pub fn verify(ctx: &TurnContext, site: Position) -> Option<BombPlan> {
        let world = Self::hypothetical(ctx, site);
        let forecast = ExplosionForecast::for_world(&world);
        let range = ctx.me().explosion_range;
        let field = SearchField::solve(&world.grid, &forecast, site, range);

        let safe_cells = field.unthreatened_count();
        debug!(%site, safe_cells, "lookahead: hypothetical bomb");
        if safe_cells == 0 {
            return None;
        }

        if !ctx.config.retreat_lookahead {
            return Some(BombPlan {
                site,
                retreat: None,
                safe_cells,
            });
        }

        let retreat = Self::best_retreat(&world, &forecast, &field, site, range)?;
        Some(BombPlan {
            site,
            retreat: Some(retreat),
            safe_cells,
        })
    }

    /// Neighbour of `site` from which the most unthreatened cells are
    /// reachable; ties go to the lower row-major index.
    ///
    /// The bombing turn is spent on the site, so each neighbour is searched
    /// as if left one turn later.
    fn best_retreat(
        world: &WorldState,
        forecast: &ExplosionForecast,
        from_site: &SearchField,
        site: Position,
        range: u32,
    ) -> Option<Position> {
        let mut best: Option<(usize, Reverse<usize>, Position)> = None;

        for neighbour in world.grid.neighbors(site) {
            let passable = world.grid.get(neighbour).is_some_and(|cell| cell.is_passable());
            if !passable || !from_site.is_reachable(neighbour) {
                continue;
            }
            let field = SearchField::solve_delayed(&world.grid, forecast, neighbour, range, 1);
            let count = field.unthreatened_count();
            debug!(%neighbour, count, "lookahead: retreat candidate");

            let index = world.grid.index(neighbour).unwrap_or(usize::MAX);
            let candidate = (count, Reverse(index), neighbour);
            if count > 0 && best.is_none_or(|current| candidate > current) {
                best = Some(candidate);
            }
        }

        best.map(|(_, _, neighbour)| neighbour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Agent, AgentId, Bomb, EngineConfig, Grid};

    fn world(rows: &[&str], at: Position, range: u32) -> WorldState {
        WorldState::new(
            Grid::from_symbols(rows).unwrap(),
            Agent::new(AgentId(0), at, 1, range),
        )
    }

    #[test]
    fn open_floor_has_an_escape() {
        let world = world(&["....."; 5], Position::new(2, 2), 3);
        let config = EngineConfig::default();
        let ctx = TurnContext::new(&config, &world);

        let plan = Lookahead::verify(&ctx, Position::new(2, 2)).unwrap();
        let retreat = plan.retreat.unwrap();
        assert_eq!(retreat.manhattan(Position::new(2, 2)), 1);
        assert!(plan.safe_cells > 0);
        // The real world is untouched.
        assert!(world.bombs.is_empty());
    }

    #[test]
    fn dead_end_is_rejected() {
        // A one-cell pocket: every reachable cell is inside the blast.
        let world = world(&["X0X", "X.X", "XXX"], Position::new(1, 1), 3);
        let config = EngineConfig::default();
        let ctx = TurnContext::new(&config, &world);

        assert_eq!(Lookahead::verify(&ctx, Position::new(1, 1)), None);
    }

    #[test]
    fn corridor_retreat_is_the_only_exit() {
        let world = world(&["X.XXX", "X....", "XXXXX"], Position::new(1, 1), 2);
        let config = EngineConfig::default();
        let ctx = TurnContext::new(&config, &world);

        let plan = Lookahead::verify(&ctx, Position::new(1, 1)).unwrap();
        assert_eq!(plan.retreat, Some(Position::new(2, 1)));
    }

    #[test]
    fn retreat_accounts_for_the_bombing_turn() {
        // West reaches the side pocket one turn too late once the bombing
        // turn is counted; east leads to the far corner.
        let mut world = world(&[".......", "XX.XXX."], Position::new(4, 0), 2);
        world.add_bomb(Bomb::new(AgentId(1), Position::ORIGIN, 3, 3));
        let config = EngineConfig::default();
        let ctx = TurnContext::new(&config, &world);

        let plan = Lookahead::verify(&ctx, Position::new(4, 0)).unwrap();
        assert_eq!(plan.retreat, Some(Position::new(5, 0)));
    }

    #[test]
    fn retreat_lookahead_can_be_disabled() {
        let world = world(&["....."; 3], Position::new(2, 1), 2);
        let config = EngineConfig::default().with_retreat_lookahead(false);
        let ctx = TurnContext::new(&config, &world);

        let plan = Lookahead::verify(&ctx, Position::new(2, 1)).unwrap();
        assert_eq!(plan.retreat, None);
    }
}
