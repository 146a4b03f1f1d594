//! Domain model for recurring goals.
//!
//! # Invariants
//! - Every goal is identified by a stable `GoalId`.
//! - Archiving is a soft flag; hard deletion is always an explicit action.

pub mod goal;
pub mod goal_map;
