//! Goal use-case services.
//!
//! # Responsibility
//! - Turn user intents (create, edit, touch, archive, list, stats) into
//!   repository calls.
//! - Own edit-boundary validation so the repository can stay rule-free.

pub mod filter;
pub mod goal_service;
pub mod statistics;
