//! Goal use-case service.
//!
//! # Responsibility
//! - Provide create/edit/touch/archive/delete entry points for front ends.
//! - Provide filtered lists and statistics on top of repository reads.
//!
//! # Invariants
//! - Empty-titled or non-positive-interval goals never reach the repository
//!   through this service.
//! - Edits replace the whole goal (last write wins) but keep its id,
//!   `touched` and `archived` values.

use crate::model::goal::{Goal, GoalId, GoalValidationError};
use crate::repo::goals_repository::GoalsRepository;
use crate::service::filter::{filter_goals, GoalsFilter};
use crate::service::statistics::GoalStatistics;
use crate::source::Lookup;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, GoalServiceError>;

/// Service error for goal use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalServiceError {
    /// Title missing or empty. Front ends show a short message for this.
    EmptyGoal,
    Validation(GoalValidationError),
    NotFound(GoalId),
}

impl Display for GoalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGoal => write!(f, "goals cannot be empty"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "goal not found: {id}"),
        }
    }
}

impl Error for GoalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GoalValidationError> for GoalServiceError {
    fn from(value: GoalValidationError) -> Self {
        match value {
            GoalValidationError::EmptyTitle => Self::EmptyGoal,
            other => Self::Validation(other),
        }
    }
}

/// User-editable goal fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    /// Days between recurrences.
    pub interval: i64,
    pub polarity: bool,
}

impl Default for GoalDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            interval: 1,
            polarity: Goal::AVOID,
        }
    }
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, interval: i64, polarity: bool) -> Self {
        Self {
            title: title.into(),
            interval,
            polarity,
        }
    }
}

/// Use-case service over a shared repository.
#[derive(Clone)]
pub struct GoalService {
    repo: Arc<GoalsRepository>,
}

impl GoalService {
    pub fn new(repo: Arc<GoalsRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<GoalsRepository> {
        &self.repo
    }

    /// Creates a goal from a draft, stamped as touched at `now_ms`.
    ///
    /// # Errors
    /// - `EmptyGoal` when the title is blank.
    /// - `Validation` when the interval is not positive.
    pub fn create_goal(&self, draft: &GoalDraft, now_ms: i64) -> ServiceResult<Goal> {
        let goal = Goal::new(draft.title.trim(), draft.interval, draft.polarity).touched_at(now_ms);
        goal.validate()?;
        self.repo.save_goal(&goal);
        info!("event=goal_create module=service status=ok goal_id={}", goal.id);
        Ok(goal)
    }

    /// Replaces the editable fields of an existing goal.
    pub async fn update_goal(&self, id: &str, draft: &GoalDraft) -> ServiceResult<Goal> {
        let existing = self.get_goal(id).await?;
        let goal = existing
            .with_title(draft.title.trim())
            .with_interval(draft.interval)
            .with_polarity(draft.polarity);
        goal.validate()?;
        self.repo.save_goal(&goal);
        info!("event=goal_update module=service status=ok goal_id={id}");
        Ok(goal)
    }

    pub async fn get_goal(&self, id: &str) -> ServiceResult<Goal> {
        self.repo
            .get_goal(id)
            .await
            .into_option()
            .ok_or_else(|| GoalServiceError::NotFound(id.to_string()))
    }

    /// Records that the user acted on a goal at `now_ms`.
    pub async fn touch_goal(&self, id: &str, now_ms: i64) -> ServiceResult<Goal> {
        let goal = self.get_goal(id).await?.touched_at(now_ms);
        self.repo.save_goal(&goal);
        info!("event=goal_touch module=service status=ok goal_id={id}");
        Ok(goal)
    }

    /// Archives or re-activates a goal, loading it first when not cached.
    pub async fn set_archived(&self, id: &str, archived: bool) -> ServiceResult<Goal> {
        let goal = self.get_goal(id).await?;
        if archived {
            self.repo.archive_goal(&goal);
        } else {
            self.repo.activate_goal(&goal);
        }
        Ok(goal.with_archived(archived))
    }

    pub async fn delete_goal(&self, id: &str) -> ServiceResult<()> {
        self.get_goal(id).await?;
        self.repo.delete_goal(id);
        Ok(())
    }

    pub fn clear_archived_goals(&self) {
        self.repo.clear_archived_goals();
    }

    /// Loads goals for a list view, optionally forcing a store refresh.
    pub async fn load_goals(&self, filter: GoalsFilter, force_update: bool) -> Lookup<Vec<Goal>> {
        if force_update {
            self.repo.refresh_goals();
        }
        self.repo
            .get_goals()
            .await
            .map(|goals| filter_goals(goals, filter))
    }

    pub async fn load_statistics(&self) -> Lookup<GoalStatistics> {
        self.repo
            .get_goals()
            .await
            .map(|goals| GoalStatistics::from_goals(&goals))
    }
}
