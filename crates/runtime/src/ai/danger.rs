//! Immediate-danger reactions, checked every turn after planning.

use std::cmp::Reverse;

use game_core::{Position, Safety};
use tracing::debug;

use super::TurnContext;
use crate::planner::{Action, Priority};

/// Emergency response injected ahead of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Own cell blows up next turn: step to the safest neighbour.
    Dodge(Position),
    /// Stepping into a neighbour would end inside its blast: stay put so the
    /// plan does not walk into it.
    Hold,
}

impl Reaction {
    pub fn into_action(self) -> Action {
        match self {
            Reaction::Dodge(target) => Action::move_to(Priority::High, target),
            Reaction::Hold => Action::wait(Priority::High, "hold"),
        }
    }
}

pub struct DangerCheck;

impl DangerCheck {
    pub fn inspect(ctx: &TurnContext) -> Option<Reaction> {
        let here = ctx.position();
        let own = ctx.field.safety(here);
        let neighbours = ctx.world.grid.neighbors(here);

        if own.needs_dodge() {
            let escape = neighbours
                .iter()
                .copied()
                .filter(|&cell| ctx.is_passable(cell))
                .max_by_key(|&cell| {
                    let index = ctx.world.grid.index(cell).unwrap_or(usize::MAX);
                    (ctx.field.safety(cell), Reverse(index))
                });
            debug!(%here, %own, escape = ?escape, "own cell about to explode");
            return escape.map(Reaction::Dodge);
        }

        // A passable neighbour left `Lethal` is one whose blast lands on arrival.
        let imminent = neighbours.iter().any(|&cell| {
            let safety = ctx.field.safety(cell);
            safety == Safety::IMMINENT || (safety.is_lethal() && ctx.is_passable(cell))
        });
        if imminent {
            debug!(%here, "neighbour about to explode; holding");
            return Some(Reaction::Hold);
        }

        None
    }
}
