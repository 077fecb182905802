//! # Taskbin Shared Library
//!
//! Shared types and business logic used by the taskbin API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their store operations
//! - `auth`: Password hashing and session tokens
//! - `db`: Connection pool and schema migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the taskbin shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
