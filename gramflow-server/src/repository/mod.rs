//! Repository Module
//!
//! Data access layer for the server. Each repository handles database
//! operations for a specific domain entity.

pub mod result_set;

// Re-export for convenience
pub use result_set as result_set_repository;
