//! Durable goal store backed by SQLite.
//!
//! # Responsibility
//! - Route every DAO call through the disk I/O executor.
//! - Translate persistence results into `Lookup` outcomes.
//!
//! # Invariants
//! - An empty table reads as `NotAvailable` (new or wiped database).
//! - Persistence errors are logged and never escape as panics.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::goal::Goal;
use crate::repo::goal_dao::{GoalDao, RepoError};
use crate::source::executor::DiskIoExecutor;
use crate::source::{GoalsDataSource, Lookup};
use async_trait::async_trait;
use log::{error, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;

/// Failure while bringing up the local store.
#[derive(Debug)]
pub enum LocalSourceError {
    Db(DbError),
    Worker(io::Error),
}

impl Display for LocalSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Worker(err) => write!(f, "failed to start disk io worker: {err}"),
        }
    }
}

impl Error for LocalSourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Worker(err) => Some(err),
        }
    }
}

impl From<DbError> for LocalSourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<io::Error> for LocalSourceError {
    fn from(value: io::Error) -> Self {
        Self::Worker(value)
    }
}

/// Local data source. Owns its connection through a `DiskIoExecutor`.
pub struct LocalGoalsDataSource {
    executor: DiskIoExecutor,
}

impl LocalGoalsDataSource {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Result<Self, LocalSourceError> {
        Ok(Self {
            executor: DiskIoExecutor::start(conn)?,
        })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalSourceError> {
        Self::new(open_db(path)?)
    }

    pub fn open_in_memory() -> Result<Self, LocalSourceError> {
        Self::new(open_db_in_memory()?)
    }

    fn write(
        &self,
        operation: &'static str,
        job: impl FnOnce(&GoalDao<'_>) -> Result<(), RepoError> + Send + 'static,
    ) {
        let queued = self.executor.execute(move |conn| {
            if let Err(err) = job(&GoalDao::new(conn)) {
                match err {
                    RepoError::NotFound(id) => warn!(
                        "event={operation} module=source status=skipped store=local reason=not_found goal_id={id}"
                    ),
                    other => error!(
                        "event={operation} module=source status=error store=local error={other}"
                    ),
                }
            }
        });
        if !queued {
            error!("event={operation} module=source status=error store=local error_code=worker_gone");
        }
    }
}

#[async_trait]
impl GoalsDataSource for LocalGoalsDataSource {
    async fn get_goals(&self) -> Lookup<Vec<Goal>> {
        match self
            .executor
            .submit(|conn| GoalDao::new(conn).get_goals())
            .await
        {
            Some(Ok(goals)) if !goals.is_empty() => Lookup::Loaded(goals),
            Some(Ok(_)) => Lookup::NotAvailable,
            Some(Err(err)) => {
                error!("event=goals_load module=source status=error store=local error={err}");
                Lookup::NotAvailable
            }
            None => {
                error!("event=goals_load module=source status=error store=local error_code=worker_gone");
                Lookup::NotAvailable
            }
        }
    }

    async fn get_goal(&self, id: &str) -> Lookup<Goal> {
        let id = id.to_string();
        match self
            .executor
            .submit(move |conn| GoalDao::new(conn).get_goal_by_id(&id))
            .await
        {
            Some(Ok(goal)) => goal.into(),
            Some(Err(err)) => {
                error!("event=goal_load module=source status=error store=local error={err}");
                Lookup::NotAvailable
            }
            None => {
                error!("event=goal_load module=source status=error store=local error_code=worker_gone");
                Lookup::NotAvailable
            }
        }
    }

    fn save_goal(&self, goal: &Goal) {
        let goal = goal.clone();
        self.write("goal_save", move |dao| dao.insert_goal(&goal));
    }

    fn archive_goal(&self, goal: &Goal) {
        let id = goal.id.clone();
        self.write("goal_archive", move |dao| dao.update_archived(&id, true));
    }

    fn activate_goal(&self, goal: &Goal) {
        let id = goal.id.clone();
        self.write("goal_activate", move |dao| dao.update_archived(&id, false));
    }

    fn clear_archived_goals(&self) {
        self.write("goals_clear_archived", |dao| dao.delete_archived_goals().map(|_| ()));
    }

    fn delete_all_goals(&self) {
        self.write("goals_delete_all", |dao| dao.delete_goals());
    }

    fn delete_goal(&self, id: &str) {
        let id = id.to_string();
        self.write("goal_delete", move |dao| dao.delete_goal_by_id(&id).map(|_| ()));
    }
}
