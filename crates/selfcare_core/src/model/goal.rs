//! Goal domain model.
//!
//! # Responsibility
//! - Define the single recurring-habit record shared by every layer.
//! - Provide immutable update helpers (each returns a new value).
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `interval` must be positive for urgency to be meaningful.
//! - A goal without a title is "empty" and rejected at the edit boundary.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque goal identifier. New goals receive UUID text, seeded goals may not.
pub type GoalId = String;

/// Recurring habit record.
///
/// Values are never mutated in place by the repository; every transition
/// (archive, activate, touch, edit) produces a new `Goal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    /// Display text. `None` or empty makes the goal "empty".
    pub title: Option<String>,
    /// Expected recurrence cadence in days.
    pub interval: i64,
    /// `true` chases the habit, `false` avoids it.
    pub polarity: bool,
    /// Unix epoch milliseconds of the last user action.
    pub touched: i64,
    /// Soft-delete / deprioritization flag.
    pub archived: bool,
}

/// Validation failures for goal invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyId,
    EmptyTitle,
    NonPositiveInterval(i64),
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "goal id must not be empty"),
            Self::EmptyTitle => write!(f, "goal title must not be empty"),
            Self::NonPositiveInterval(value) => {
                write!(f, "goal interval must be positive, got {value}")
            }
        }
    }
}

impl Error for GoalValidationError {}

impl Goal {
    /// Polarity value for habits the user wants to keep up.
    pub const CHASE: bool = true;
    /// Polarity value for habits the user wants to stay away from.
    pub const AVOID: bool = false;

    /// Creates a new goal with a generated id.
    ///
    /// `touched` starts at zero and `archived` at `false`.
    pub fn new(title: impl Into<String>, interval: i64, polarity: bool) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, interval, polarity)
    }

    /// Creates a goal with a caller-provided id.
    ///
    /// Used by edit and seed paths where identity already exists.
    pub fn with_id(
        id: impl Into<GoalId>,
        title: impl Into<String>,
        interval: i64,
        polarity: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            interval,
            polarity,
            touched: 0,
            archived: false,
        }
    }

    pub fn with_archived(&self, archived: bool) -> Self {
        Self {
            archived,
            ..self.clone()
        }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self.clone()
        }
    }

    pub fn with_interval(&self, interval: i64) -> Self {
        Self {
            interval,
            ..self.clone()
        }
    }

    pub fn with_polarity(&self, polarity: bool) -> Self {
        Self {
            polarity,
            ..self.clone()
        }
    }

    /// Returns a copy stamped with a new last-touched time.
    pub fn touched_at(&self, epoch_ms: i64) -> Self {
        Self {
            touched: epoch_ms,
            ..self.clone()
        }
    }

    /// Title text for list rows; empty when absent.
    pub fn title_for_list(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
    }

    pub fn is_active(&self) -> bool {
        !self.archived
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Checks edit-boundary invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `EmptyTitle` when the goal is empty.
    /// - `NonPositiveInterval` when `interval <= 0`.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.id.trim().is_empty() {
            return Err(GoalValidationError::EmptyId);
        }
        if self.is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if self.interval <= 0 {
            return Err(GoalValidationError::NonPositiveInterval(self.interval));
        }
        Ok(())
    }
}
