//! Aggregate counts for the statistics view.

use crate::model::goal::Goal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GoalStatistics {
    pub active: usize,
    pub archived: usize,
}

impl GoalStatistics {
    pub fn from_goals<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Self {
        goals
            .into_iter()
            .fold(Self::default(), |mut stats, goal| {
                if goal.is_archived() {
                    stats.archived += 1;
                } else {
                    stats.active += 1;
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.active + self.archived
    }

    /// Whether the view should show its "no data" message.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
