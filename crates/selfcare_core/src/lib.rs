//! Core logic for the self-care goal dashboard.
//! This crate is the single source of truth for goal invariants.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;
pub mod urgency;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::Dashboard;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, GoalId, GoalValidationError};
pub use model::goal_map::GoalMap;
pub use repo::goal_dao::{GoalDao, RepoError, RepoResult};
pub use repo::goals_repository::GoalsRepository;
pub use service::filter::{filter_goals, GoalsFilter};
pub use service::goal_service::{GoalDraft, GoalService, GoalServiceError, ServiceResult};
pub use service::statistics::GoalStatistics;
pub use source::local::{LocalGoalsDataSource, LocalSourceError};
pub use source::remote::FakeRemoteGoalsDataSource;
pub use source::{GoalsDataSource, Lookup};
pub use urgency::{now_millis, Rgb, Urgency};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
