//! Goal data sources behind the repository cache.
//!
//! # Responsibility
//! - Define the contract shared by the durable local store and the remote
//!   stand-in.
//! - Replace paired success/not-available callbacks with one outcome type.
//!
//! # Invariants
//! - Reads never report I/O failures separately from absence; both resolve
//!   to `Lookup::NotAvailable`.
//! - Writes are fire-and-forget. Failures are logged by the source.

use crate::model::goal::Goal;
use async_trait::async_trait;

pub mod executor;
pub mod local;
pub mod remote;

/// Outcome of a read against a goal source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Loaded(T),
    NotAvailable,
}

impl<T> Lookup<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Loaded(value) => Lookup::Loaded(f(value)),
            Self::NotAvailable => Lookup::NotAvailable,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Loaded(value),
            None => Self::NotAvailable,
        }
    }
}

/// Store of goals keyed by id.
///
/// Implementations must be shareable across tasks; the repository holds them
/// behind `Arc<dyn GoalsDataSource>`.
#[async_trait]
pub trait GoalsDataSource: Send + Sync {
    /// All goals, or `NotAvailable` when the store is empty or unreadable.
    async fn get_goals(&self) -> Lookup<Vec<Goal>>;

    async fn get_goal(&self, id: &str) -> Lookup<Goal>;

    /// Inserts or replaces `goal` as a whole.
    fn save_goal(&self, goal: &Goal);

    fn archive_goal(&self, goal: &Goal);

    fn activate_goal(&self, goal: &Goal);

    fn clear_archived_goals(&self);

    fn delete_all_goals(&self);

    fn delete_goal(&self, id: &str);
}
