//! Insertion-ordered goal collection.
//!
//! Upserting an existing id keeps its original position, so list views stay
//! stable while individual goals change.

use crate::model::goal::{Goal, GoalId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GoalMap {
    order: Vec<GoalId>,
    entries: HashMap<GoalId, Goal>,
}

impl GoalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a goal, returning the previous value.
    pub fn upsert(&mut self, goal: Goal) -> Option<Goal> {
        let id = goal.id.clone();
        let previous = self.entries.insert(id.clone(), goal);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.entries.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Goal> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            self.order.retain(|existing| existing != id);
        }
        removed
    }

    /// Removes every goal matching `predicate` and returns how many went.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Goal) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, goal| !predicate(&*goal));
        let entries = &self.entries;
        self.order.retain(|id| entries.contains_key(id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    /// Replaces the whole content, keeping the order of `goals`.
    pub fn replace_all(&mut self, goals: impl IntoIterator<Item = Goal>) {
        self.clear();
        for goal in goals {
            self.upsert(goal);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all goals in insertion order.
    pub fn values(&self) -> Vec<Goal> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::GoalMap;
    use crate::model::goal::Goal;

    fn ids(map: &GoalMap) -> Vec<String> {
        map.values().into_iter().map(|goal| goal.id).collect()
    }

    #[test]
    fn upsert_keeps_first_insertion_position() {
        let mut map = GoalMap::new();
        map.upsert(Goal::with_id("a", "walk", 1, Goal::CHASE));
        map.upsert(Goal::with_id("b", "read", 2, Goal::CHASE));
        let previous = map.upsert(Goal::with_id("a", "run", 1, Goal::CHASE));

        assert_eq!(previous.and_then(|goal| goal.title).as_deref(), Some("walk"));
        assert_eq!(ids(&map), vec!["a", "b"]);
        assert_eq!(map.get("a").and_then(|goal| goal.title.as_deref()), Some("run"));
    }

    #[test]
    fn remove_where_drops_matching_entries_only() {
        let mut map = GoalMap::new();
        map.upsert(Goal::with_id("a", "walk", 1, Goal::CHASE));
        map.upsert(Goal::with_id("b", "smoke", 1, Goal::AVOID).with_archived(true));
        map.upsert(Goal::with_id("c", "soda", 1, Goal::AVOID).with_archived(true));

        let removed = map.remove_where(Goal::is_archived);

        assert_eq!(removed, 2);
        assert_eq!(ids(&map), vec!["a"]);
    }
}
