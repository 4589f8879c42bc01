//! # Taskboard Shared Library
//!
//! This crate contains the data layer and business logic shared by the
//! taskboard web server (and any future binaries).
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `query`: Owner-scoped task listing with search filtering
//! - `auth`: Password hashing and session token utilities
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod query;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
