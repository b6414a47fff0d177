//! Read-only projections of task records.
//!
//! # Responsibility
//! - Shape task data for display without exposing mutation paths.

pub mod detail;
