//! SQLite data access object for the `goals` table.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Map rows to `Goal` values and back, one row per goal.
//!
//! # Invariants
//! - Writes never validate; edit-boundary validation happens in services.
//! - Reads reject corrupt persisted state instead of masking it.
//! - Rows come back in insertion (rowid) order.

use crate::db::DbError;
use crate::model::goal::{Goal, GoalId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const GOAL_SELECT_SQL: &str = "SELECT
    id,
    title,
    polarity,
    interval,
    touched,
    archived
FROM goals";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for goal rows.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(GoalId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "goal not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted goal data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Goal table accessor bound to one connection.
pub struct GoalDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> GoalDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Selects every goal, archived ones included.
    pub fn get_goals(&self) -> RepoResult<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut goals = Vec::new();

        while let Some(row) = rows.next()? {
            goals.push(parse_goal_row(row)?);
        }

        Ok(goals)
    }

    pub fn get_goal_by_id(&self, id: &str) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    /// Inserts a goal, replacing any row with the same id.
    ///
    /// Replacement is whole-row: no field of the previous row survives.
    pub fn insert_goal(&self, goal: &Goal) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO goals (
                id,
                title,
                polarity,
                interval,
                touched,
                archived
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                goal.id.as_str(),
                goal.title.as_deref(),
                bool_to_int(goal.polarity),
                goal.interval,
                goal.touched,
                bool_to_int(goal.archived),
            ],
        )?;

        Ok(())
    }

    /// Flips the archived flag of one goal.
    ///
    /// # Errors
    /// - `NotFound` when no row carries `id`.
    pub fn update_archived(&self, id: &str, archived: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE goals SET archived = ?1 WHERE id = ?2;",
            params![bool_to_int(archived), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Deletes one goal and returns the number of removed rows.
    pub fn delete_goal_by_id(&self, id: &str) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM goals WHERE id = ?1;", [id])?)
    }

    pub fn delete_goals(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM goals;", [])?;
        Ok(())
    }

    /// Deletes archived goals and returns the number of removed rows.
    pub fn delete_archived_goals(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM goals WHERE archived = 1;", [])?)
    }
}

fn parse_goal_row(row: &Row<'_>) -> RepoResult<Goal> {
    let id: String = row.get("id")?;
    let polarity = parse_flag(row.get("polarity")?, "polarity")?;
    let archived = parse_flag(row.get("archived")?, "archived")?;

    Ok(Goal {
        id,
        title: row.get("title")?,
        interval: row.get("interval")?,
        polarity,
        touched: row.get("touched")?,
        archived,
    })
}

fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in goals.{column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
