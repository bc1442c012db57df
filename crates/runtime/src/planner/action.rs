//! Plan steps and their pre/postconditions.
use std::fmt;

use game_core::{Agent, Position};

use crate::command::Command;

/// Scheduling tier; lower tiers run first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    /// Reactions to imminent danger.
    High,
    /// Regular plan steps.
    #[default]
    Normal,
    /// Filler used when nothing else is planned.
    Low,
}

/// What a plan step does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Walk to `target`.
    Move { target: Position },
    /// Get to `site`, drop a bomb there and head for `target`.
    PlaceBombAndAdvance { site: Position, target: Position },
    /// Stay in place for one turn.
    Wait { reason: String },
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Move { target } => write!(f, "move to {target}"),
            ActionKind::PlaceBombAndAdvance { site, target } => {
                write!(f, "bomb at {site} then advance to {target}")
            }
            ActionKind::Wait { reason } => write!(f, "wait ({reason})"),
        }
    }
}

/// A queued plan step with its progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub priority: Priority,
    pub kind: ActionKind,
    /// Bomb dropped (for `PlaceBombAndAdvance`) or turn spent (for `Wait`).
    fulfilled: bool,
}

impl Action {
    pub fn new(priority: Priority, kind: ActionKind) -> Self {
        Self {
            priority,
            kind,
            fulfilled: false,
        }
    }

    pub fn move_to(priority: Priority, target: Position) -> Self {
        Self::new(priority, ActionKind::Move { target })
    }

    pub fn place_bomb(priority: Priority, site: Position, target: Position) -> Self {
        Self::new(priority, ActionKind::PlaceBombAndAdvance { site, target })
    }

    pub fn wait(priority: Priority, reason: impl Into<String>) -> Self {
        Self::new(
            priority,
            ActionKind::Wait {
                reason: reason.into(),
            },
        )
    }

    /// Whether the step can run this turn.
    pub fn precondition(&self, me: &Agent) -> bool {
        match &self.kind {
            ActionKind::Move { target } => me.position != *target,
            ActionKind::PlaceBombAndAdvance { .. } | ActionKind::Wait { .. } => true,
        }
    }

    /// Whether the step has achieved its goal and can be retired.
    pub fn postcondition(&self, me: &Agent) -> bool {
        match &self.kind {
            ActionKind::Move { target } => me.position == *target,
            ActionKind::PlaceBombAndAdvance { .. } | ActionKind::Wait { .. } => self.fulfilled,
        }
    }

    /// Site of a bomb this step drops on its next execution, if any: the
    /// agent stands on the site and has a bomb in hand.
    pub fn arming_site(&self, me: &Agent) -> Option<Position> {
        match self.kind {
            ActionKind::PlaceBombAndAdvance { site, .. }
                if !self.fulfilled && me.position == site && me.bombs_available > 0 =>
            {
                Some(site)
            }
            _ => None,
        }
    }

    /// Produces this turn's command and records progress.
    pub fn execute(&mut self, me: &Agent) -> Command {
        match &self.kind {
            ActionKind::Move { target } => Command::move_to(*target),
            ActionKind::PlaceBombAndAdvance { site, target } => {
                if me.position != *site {
                    Command::move_to(*site)
                } else if me.bombs_available > 0 {
                    self.fulfilled = true;
                    Command::bomb(*target)
                } else {
                    Command::wait(*site, "waiting for a bomb")
                }
            }
            ActionKind::Wait { reason } => {
                let command = Command::wait(me.position, reason.as_str());
                self.fulfilled = true;
                command
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.priority, self.kind)
    }
}
