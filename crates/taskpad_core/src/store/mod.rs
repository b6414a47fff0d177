//! Task list use-case layer.
//!
//! # Responsibility
//! - Orchestrate list mutations and persistence into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
