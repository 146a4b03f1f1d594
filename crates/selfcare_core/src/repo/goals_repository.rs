//! Cache-coherent goal repository.
//!
//! # Responsibility
//! - Be the single point of truth for goal data seen by use cases.
//! - Coordinate the durable local store and the remote store behind an
//!   in-memory, insertion-ordered cache.
//!
//! # Invariants
//! - The cache lock is never held across an `.await`.
//! - A full collection fetch from either store marks the cache clean.
//! - `refresh_goals` forces the next `get_goals` to re-query the local store
//!   before consulting the remote one.
//! - Writes go to both stores, remote first, with no compensation if one
//!   of them fails.

use crate::model::goal::{Goal, GoalId};
use crate::model::goal_map::GoalMap;
use crate::source::{GoalsDataSource, Lookup};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct CacheState {
    goals: GoalMap,
    /// Set once the cache mirrors a full collection fetch.
    complete: bool,
    dirty: bool,
}

/// Repository over a remote and a local goal source.
///
/// Constructed explicitly and shared by `Arc`; there is no global instance.
pub struct GoalsRepository {
    remote: Arc<dyn GoalsDataSource>,
    local: Arc<dyn GoalsDataSource>,
    cache: Mutex<CacheState>,
}

impl GoalsRepository {
    pub fn new(remote: Arc<dyn GoalsDataSource>, local: Arc<dyn GoalsDataSource>) -> Self {
        Self {
            remote,
            local,
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// Returns every known goal.
    ///
    /// Served from cache when it is complete, clean and non-empty. Otherwise
    /// the local store is queried, then the remote store; a remote hit also
    /// overwrites the local store. Resolves to `NotAvailable` when both
    /// stores come back empty.
    pub async fn get_goals(&self) -> Lookup<Vec<Goal>> {
        {
            let cache = self.lock_cache();
            if cache.complete && !cache.dirty && !cache.goals.is_empty() {
                debug!(
                    "event=goals_load module=repo status=ok source=cache count={}",
                    cache.goals.len()
                );
                return Lookup::Loaded(cache.goals.values());
            }
        }

        if let Lookup::Loaded(goals) = self.local.get_goals().await {
            let goals = self.refresh_cache(goals);
            info!(
                "event=goals_load module=repo status=ok source=local count={}",
                goals.len()
            );
            return Lookup::Loaded(goals);
        }

        match self.remote.get_goals().await {
            Lookup::Loaded(goals) => {
                self.refresh_local_data_source(&goals);
                let goals = self.refresh_cache(goals);
                info!(
                    "event=goals_load module=repo status=ok source=remote count={}",
                    goals.len()
                );
                Lookup::Loaded(goals)
            }
            Lookup::NotAvailable => {
                info!("event=goals_load module=repo status=not_available");
                Lookup::NotAvailable
            }
        }
    }

    /// Returns one goal by id from cache, local store, or remote store.
    pub async fn get_goal(&self, id: &str) -> Lookup<Goal> {
        if let Some(goal) = self.cached_goal(id) {
            debug!("event=goal_load module=repo status=ok source=cache goal_id={id}");
            return Lookup::Loaded(goal);
        }

        let (source, lookup) = match self.local.get_goal(id).await {
            Lookup::Loaded(goal) => ("local", Lookup::Loaded(goal)),
            Lookup::NotAvailable => ("remote", self.remote.get_goal(id).await),
        };

        match lookup {
            Lookup::Loaded(goal) => {
                self.lock_cache().goals.upsert(goal.clone());
                debug!("event=goal_load module=repo status=ok source={source} goal_id={id}");
                Lookup::Loaded(goal)
            }
            Lookup::NotAvailable => {
                info!("event=goal_load module=repo status=not_available goal_id={id}");
                Lookup::NotAvailable
            }
        }
    }

    /// Writes `goal` to both stores and upserts the cache entry.
    ///
    /// No validation happens here; empty goals are rejected by callers.
    pub fn save_goal(&self, goal: &Goal) {
        self.remote.save_goal(goal);
        self.local.save_goal(goal);
        self.lock_cache().goals.upsert(goal.clone());
        info!("event=goal_save module=repo status=ok goal_id={}", goal.id);
    }

    pub fn archive_goal(&self, goal: &Goal) {
        self.remote.archive_goal(goal);
        self.local.archive_goal(goal);
        self.lock_cache().goals.upsert(goal.with_archived(true));
        info!("event=goal_archive module=repo status=ok goal_id={}", goal.id);
    }

    /// Archives a cached goal by id.
    ///
    /// Returns `false` and leaves both stores untouched when `id` is not in
    /// the cache.
    pub fn archive_goal_by_id(&self, id: &str) -> bool {
        match self.cached_goal(id) {
            Some(goal) => {
                self.archive_goal(&goal);
                true
            }
            None => {
                warn!("event=goal_archive module=repo status=skipped reason=not_cached goal_id={id}");
                false
            }
        }
    }

    pub fn activate_goal(&self, goal: &Goal) {
        self.remote.activate_goal(goal);
        self.local.activate_goal(goal);
        self.lock_cache().goals.upsert(goal.with_archived(false));
        info!("event=goal_activate module=repo status=ok goal_id={}", goal.id);
    }

    /// Activates a cached goal by id. Same miss behavior as
    /// `archive_goal_by_id`.
    pub fn activate_goal_by_id(&self, id: &str) -> bool {
        match self.cached_goal(id) {
            Some(goal) => {
                self.activate_goal(&goal);
                true
            }
            None => {
                warn!("event=goal_activate module=repo status=skipped reason=not_cached goal_id={id}");
                false
            }
        }
    }

    pub fn clear_archived_goals(&self) {
        self.remote.clear_archived_goals();
        self.local.clear_archived_goals();
        let removed = self.lock_cache().goals.remove_where(Goal::is_archived);
        info!("event=goals_clear_archived module=repo status=ok cached_removed={removed}");
    }

    pub fn delete_all_goals(&self) {
        self.remote.delete_all_goals();
        self.local.delete_all_goals();
        self.lock_cache().goals.clear();
        info!("event=goals_delete_all module=repo status=ok");
    }

    pub fn delete_goal(&self, id: &str) {
        self.remote.delete_goal(id);
        self.local.delete_goal(id);
        self.lock_cache().goals.remove(id);
        info!("event=goal_delete module=repo status=ok goal_id={id}");
    }

    /// Marks the cache dirty so the next `get_goals` bypasses it.
    pub fn refresh_goals(&self) {
        self.lock_cache().dirty = true;
        debug!("event=goals_refresh module=repo status=ok");
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.lock_cache().dirty
    }

    pub fn cached_goal_count(&self) -> usize {
        self.lock_cache().goals.len()
    }

    /// Ids currently held in cache, in insertion order.
    pub fn cached_goal_ids(&self) -> Vec<GoalId> {
        self.lock_cache()
            .goals
            .values()
            .into_iter()
            .map(|goal| goal.id)
            .collect()
    }

    fn cached_goal(&self, id: &str) -> Option<Goal> {
        self.lock_cache().goals.get(id).cloned()
    }

    fn refresh_cache(&self, goals: Vec<Goal>) -> Vec<Goal> {
        let mut cache = self.lock_cache();
        cache.goals.replace_all(goals);
        cache.complete = true;
        cache.dirty = false;
        cache.goals.values()
    }

    /// Overwrites the local store with `goals`: delete all, then save each.
    fn refresh_local_data_source(&self, goals: &[Goal]) {
        self.local.delete_all_goals();
        for goal in goals {
            self.local.save_goal(goal);
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, CacheState> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
