//! In-memory stand-in for a goals backend.
//!
//! Reads are delayed by a configurable latency to mimic a network round
//! trip; writes apply immediately.

use crate::model::goal::Goal;
use crate::model::goal_map::GoalMap;
use crate::source::{GoalsDataSource, Lookup};
use crate::urgency::MILLIS_PER_DAY;
use async_trait::async_trait;
use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Fake remote data source.
#[derive(Debug, Default)]
pub struct FakeRemoteGoalsDataSource {
    goals: Mutex<GoalMap>,
    latency: Duration,
}

impl FakeRemoteGoalsDataSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            goals: Mutex::new(GoalMap::new()),
            latency,
        }
    }

    /// Creates a source pre-filled with `goals`, in order.
    pub fn with_goals(latency: Duration, goals: impl IntoIterator<Item = Goal>) -> Self {
        let source = Self::new(latency);
        source.lock().replace_all(goals);
        source
    }

    /// Demo habits used to bootstrap an empty install.
    pub fn sample_goals(now_ms: i64) -> Vec<Goal> {
        vec![
            Goal::with_id("0", "Stretch", 1, Goal::CHASE).touched_at(now_ms - MILLIS_PER_DAY / 2),
            Goal::with_id("1", "Call a friend", 7, Goal::CHASE)
                .touched_at(now_ms - 3 * MILLIS_PER_DAY),
            Goal::with_id("2", "Water the plants", 3, Goal::CHASE)
                .touched_at(now_ms - 4 * MILLIS_PER_DAY),
            Goal::with_id("3", "Late-night snacking", 5, Goal::AVOID)
                .touched_at(now_ms - 2 * MILLIS_PER_DAY),
        ]
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, GoalMap> {
        self.goals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl GoalsDataSource for FakeRemoteGoalsDataSource {
    async fn get_goals(&self) -> Lookup<Vec<Goal>> {
        self.simulate_latency().await;
        let goals = self.lock().values();
        debug!(
            "event=goals_load module=source status=ok store=remote count={}",
            goals.len()
        );
        if goals.is_empty() {
            Lookup::NotAvailable
        } else {
            Lookup::Loaded(goals)
        }
    }

    async fn get_goal(&self, id: &str) -> Lookup<Goal> {
        self.simulate_latency().await;
        let goal = self.lock().get(id).cloned();
        goal.into()
    }

    fn save_goal(&self, goal: &Goal) {
        self.lock().upsert(goal.clone());
    }

    fn archive_goal(&self, goal: &Goal) {
        self.lock().upsert(goal.with_archived(true));
    }

    fn activate_goal(&self, goal: &Goal) {
        self.lock().upsert(goal.with_archived(false));
    }

    fn clear_archived_goals(&self) {
        self.lock().remove_where(Goal::is_archived);
    }

    fn delete_all_goals(&self) {
        self.lock().clear();
    }

    fn delete_goal(&self, id: &str) {
        self.lock().remove(id);
    }
}
