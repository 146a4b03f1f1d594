//! Goal persistence and the repository façade over it.
//!
//! # Responsibility
//! - Keep SQL inside `goal_dao`.
//! - Expose cache-coherent reads and writes through `GoalsRepository`.
//!
//! # Invariants
//! - Persistence APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Use cases talk to `GoalsRepository`, never to a store directly.

pub mod goal_dao;
pub mod goals_repository;
