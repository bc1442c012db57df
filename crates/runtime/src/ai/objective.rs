use std::fmt;

use game_core::Position;

use crate::planner::{Action, Priority};

/// What the agent sets out to do once the plan runs dry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Objective {
    /// Bomb the current cell, then step to `retreat` if one was chosen.
    BombHere {
        site: Position,
        retreat: Option<Position>,
    },
    /// Walk `path` to `site` and bomb it on arrival.
    BombAt { site: Position, path: Vec<Position> },
    /// Walk `path` to the safe cell `target`.
    Retreat {
        target: Position,
        path: Vec<Position>,
    },
    /// Stay in place this turn.
    Wait { reason: &'static str },
}

impl Objective {
    /// Plan steps realizing this objective, in execution order.
    pub fn into_actions(self) -> Vec<Action> {
        match self {
            Objective::BombHere { site, retreat } => {
                let mut actions = vec![Action::place_bomb(Priority::Normal, site, site)];
                actions.extend(retreat.map(|cell| Action::move_to(Priority::Normal, cell)));
                actions
            }
            Objective::BombAt { site, path } => path
                .into_iter()
                .map(|step| Action::move_to(Priority::Normal, step))
                .chain(std::iter::once(Action::place_bomb(
                    Priority::Normal,
                    site,
                    site,
                )))
                .collect(),
            Objective::Retreat { path, .. } => path
                .into_iter()
                .map(|step| Action::move_to(Priority::Normal, step))
                .collect(),
            Objective::Wait { reason } => vec![Action::wait(Priority::Normal, reason)],
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::BombHere {
                site,
                retreat: Some(retreat),
            } => write!(f, "bomb {site}, retreat to {retreat}"),
            Objective::BombHere { site, retreat: None } => write!(f, "bomb {site}"),
            Objective::BombAt { site, path } => {
                write!(f, "bomb {site} after {} steps", path.len())
            }
            Objective::Retreat { target, path } => {
                write!(f, "retreat to {target} in {} steps", path.len())
            }
            Objective::Wait { reason } => write!(f, "wait: {reason}"),
        }
    }
}
