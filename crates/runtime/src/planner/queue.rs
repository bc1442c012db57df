use std::collections::BTreeMap;

use super::{Action, Priority};

/// Ordering key: priority tier first, then insertion order (older first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueueKey {
    pub priority: Priority,
    pub order: u64,
}

/// Priority-ordered store of pending actions.
///
/// Iteration yields actions in execution order, so callers can scan past
/// entries that cannot run yet.
#[derive(Clone, Debug, Default)]
pub struct ActionQueue {
    entries: BTreeMap<QueueKey, Action>,
    next_order: u64,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) -> QueueKey {
        let key = QueueKey {
            priority: action.priority,
            order: self.next_order,
        };
        self.next_order += 1;
        self.entries.insert(key, action);
        key
    }

    pub fn remove(&mut self, key: QueueKey) -> Option<Action> {
        self.entries.remove(&key)
    }

    pub fn get_mut(&mut self, key: QueueKey) -> Option<&mut Action> {
        self.entries.get_mut(&key)
    }

    pub fn retain(&mut self, keep: impl FnMut(&QueueKey, &mut Action) -> bool) {
        self.entries.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QueueKey, &Action)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
