//! Task search entry points.
//!
//! # Responsibility
//! - Derive the filtered list view from the full task list and a query.
//! - Keep result shaping deterministic and free of side effects.

pub mod filter;
