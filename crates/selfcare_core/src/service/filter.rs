//! List filtering for goal views.

use crate::model::goal::Goal;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which goals a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalsFilter {
    #[default]
    All,
    /// Goals not archived yet.
    Active,
    Archived,
}

impl GoalsFilter {
    pub fn matches(self, goal: &Goal) -> bool {
        match self {
            Self::All => true,
            Self::Active => goal.is_active(),
            Self::Archived => goal.is_archived(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl Display for GoalsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalsFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(format!(
                "unsupported goals filter `{other}`; expected all|active|archived"
            )),
        }
    }
}

/// Keeps the goals `filter` selects, preserving order.
pub fn filter_goals(goals: Vec<Goal>, filter: GoalsFilter) -> Vec<Goal> {
    goals
        .into_iter()
        .filter(|goal| filter.matches(goal))
        .collect()
}
