//! Application-scoped wiring of stores, repository and service.
//!
//! One `Dashboard` per process replaces global singletons; tests build a
//! fresh one per case.

use crate::config::DashboardConfig;
use crate::repo::goals_repository::GoalsRepository;
use crate::service::goal_service::GoalService;
use crate::source::local::{LocalGoalsDataSource, LocalSourceError};
use crate::source::remote::FakeRemoteGoalsDataSource;
use crate::urgency::now_millis;
use log::info;
use std::sync::Arc;

pub struct Dashboard {
    repository: Arc<GoalsRepository>,
    service: GoalService,
}

impl Dashboard {
    /// Opens the local store named by `config` and wires the repository.
    ///
    /// Logging is not initialized here; callers decide when to call
    /// `init_logging`.
    pub fn open(config: &DashboardConfig) -> Result<Self, LocalSourceError> {
        let local = match &config.db_path {
            Some(path) => LocalGoalsDataSource::open(path)?,
            None => LocalGoalsDataSource::open_in_memory()?,
        };
        let remote = if config.seed_remote {
            FakeRemoteGoalsDataSource::with_goals(
                config.remote_latency(),
                FakeRemoteGoalsDataSource::sample_goals(now_millis()),
            )
        } else {
            FakeRemoteGoalsDataSource::new(config.remote_latency())
        };
        info!(
            "event=dashboard_open module=core status=ok store={} seeded={}",
            if config.db_path.is_some() { "file" } else { "memory" },
            config.seed_remote
        );

        let repository = Arc::new(GoalsRepository::new(Arc::new(remote), Arc::new(local)));
        Ok(Self {
            service: GoalService::new(Arc::clone(&repository)),
            repository,
        })
    }

    pub fn repository(&self) -> &Arc<GoalsRepository> {
        &self.repository
    }

    pub fn service(&self) -> &GoalService {
        &self.service
    }
}
