//! Flutter-facing FFI crate for Taskpad.
//!
//! # Responsibility
//! - Host the FRB-exported use-case API in [`api`].

pub mod api;
