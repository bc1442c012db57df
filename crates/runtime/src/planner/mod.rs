//! Multi-turn action planner.
//!
//! The planner keeps a priority-ordered queue of [`Action`]s that survives
//! across turns. Each turn it first retires actions whose postcondition
//! already holds, then executes the first action whose precondition holds.
//! High-priority reactions (dodges, holds) are slotted in ahead of the plan
//! without discarding it.
mod action;
mod queue;

pub use action::{Action, ActionKind, Priority};
pub use queue::{ActionQueue, QueueKey};

use game_core::Agent;
use tracing::debug;

use crate::command::Command;

#[derive(Clone, Debug, Default)]
pub struct Planner {
    queue: ActionQueue,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, action: Action) -> QueueKey {
        debug!(%action, "enqueue");
        self.queue.push(action)
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.enqueue(action);
        }
    }

    /// Drops every queued action whose postcondition already holds.
    pub fn retire_completed(&mut self, me: &Agent) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, action| {
            let done = action.postcondition(me);
            if done {
                debug!(%action, "retired");
            }
            !done
        });
        before - self.queue.len()
    }

    /// Runs the first executable action in priority order.
    ///
    /// Emits at most one command; the action is retired immediately if its
    /// postcondition holds after execution.
    pub fn execute_next(&mut self, me: &Agent) -> Option<Command> {
        let key = self.next_key(me)?;

        let action = self.queue.get_mut(key)?;
        let command = action.execute(me);
        debug!(%action, %command, "executed");
        if action.postcondition(me) {
            self.queue.remove(key);
        }
        Some(command)
    }

    /// The action [`execute_next`](Self::execute_next) would run, without
    /// running it.
    pub fn next_executable(&self, me: &Agent) -> Option<&Action> {
        self.queue
            .iter()
            .find(|(_, action)| action.precondition(me))
            .map(|(_, action)| action)
    }

    fn next_key(&self, me: &Agent) -> Option<QueueKey> {
        self.queue
            .iter()
            .find(|(_, action)| action.precondition(me))
            .map(|(key, _)| *key)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Pending actions in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> + '_ {
        self.queue.iter().map(|(_, action)| action)
    }

    /// One line per pending action, for trace dumps.
    pub fn render(&self) -> String {
        self.iter()
            .map(|action| format!("{action}\n"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AgentId, Position};

    fn me() -> Agent {
        Agent::new(AgentId(0), Position::new(1, 1), 1, 3)
    }

    #[test]
    fn equal_priority_runs_in_insertion_order() {
        let mut planner = Planner::new();
        planner.enqueue(Action::move_to(Priority::Normal, Position::new(2, 1)));
        planner.enqueue(Action::move_to(Priority::Normal, Position::new(3, 1)));

        let command = planner.execute_next(&me()).unwrap();
        assert_eq!(command, Command::move_to(Position::new(2, 1)));
        assert_eq!(planner.len(), 2);
    }

    #[test]
    fn skips_actions_whose_precondition_fails() {
        let mut planner = Planner::new();
        planner.enqueue(Action::move_to(Priority::High, me().position));
        planner.enqueue(Action::wait(Priority::Low, "idle"));

        let command = planner.execute_next(&me()).unwrap();
        assert_eq!(command.to_string(), "MOVE 1 1 idle");
        // The wait retired itself; the stale move is still pending.
        assert_eq!(planner.len(), 1);
        assert_eq!(planner.retire_completed(&me()), 1);
        assert!(planner.is_empty());
        assert_eq!(planner.execute_next(&me()), None);
    }

    #[test]
    fn peeks_without_executing() {
        let mut planner = Planner::new();
        planner.enqueue(Action::wait(Priority::Low, "idle"));
        planner.enqueue(Action::place_bomb(Priority::Normal, me().position, me().position));

        let next = planner.next_executable(&me()).unwrap();
        assert_eq!(next.arming_site(&me()), Some(me().position));
        assert_eq!(planner.len(), 2);
        assert_eq!(planner.execute_next(&me()), Some(Command::bomb(me().position)));
    }
}
