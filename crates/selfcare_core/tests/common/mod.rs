#![allow(dead_code)]

use async_trait::async_trait;
use selfcare_core::{
    FakeRemoteGoalsDataSource, Goal, GoalsDataSource, GoalsRepository, LocalGoalsDataSource, Lookup,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wraps a data source and counts calls that reach it.
pub struct SpySource<S> {
    inner: S,
    get_goals_calls: AtomicUsize,
    get_goal_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl<S> SpySource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            get_goals_calls: AtomicUsize::new(0),
            get_goal_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn get_goals_calls(&self) -> usize {
        self.get_goals_calls.load(Ordering::SeqCst)
    }

    pub fn get_goal_calls(&self) -> usize {
        self.get_goal_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: GoalsDataSource> GoalsDataSource for SpySource<S> {
    async fn get_goals(&self) -> Lookup<Vec<Goal>> {
        self.get_goals_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_goals().await
    }

    async fn get_goal(&self, id: &str) -> Lookup<Goal> {
        self.get_goal_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_goal(id).await
    }

    fn save_goal(&self, goal: &Goal) {
        self.record_write();
        self.inner.save_goal(goal);
    }

    fn archive_goal(&self, goal: &Goal) {
        self.record_write();
        self.inner.archive_goal(goal);
    }

    fn activate_goal(&self, goal: &Goal) {
        self.record_write();
        self.inner.activate_goal(goal);
    }

    fn clear_archived_goals(&self) {
        self.record_write();
        self.inner.clear_archived_goals();
    }

    fn delete_all_goals(&self) {
        self.record_write();
        self.inner.delete_all_goals();
    }

    fn delete_goal(&self, id: &str) {
        self.record_write();
        self.inner.delete_goal(id);
    }
}

pub type SpyLocal = SpySource<LocalGoalsDataSource>;
pub type SpyRemote = SpySource<FakeRemoteGoalsDataSource>;

/// Repository over an in-memory SQLite store and an empty remote, both spied.
pub fn spied_repository() -> (GoalsRepository, Arc<SpyRemote>, Arc<SpyLocal>) {
    spied_repository_with_remote(Vec::new())
}

pub fn spied_repository_with_remote(
    remote_goals: Vec<Goal>,
) -> (GoalsRepository, Arc<SpyRemote>, Arc<SpyLocal>) {
    let remote = Arc::new(SpySource::new(FakeRemoteGoalsDataSource::with_goals(
        Duration::ZERO,
        remote_goals,
    )));
    let local = Arc::new(SpySource::new(
        LocalGoalsDataSource::open_in_memory().unwrap(),
    ));
    let repository = GoalsRepository::new(remote.clone(), local.clone());
    (repository, remote, local)
}

pub fn goal(id: &str, title: &str) -> Goal {
    Goal::with_id(id, title, 7, Goal::CHASE).touched_at(1_700_000_000_000)
}
