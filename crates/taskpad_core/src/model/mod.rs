//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical task record shared by list and detail projections.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` generated at creation.
//! - Deletion removes a task from the list; there is no tombstone state.

pub mod task;
