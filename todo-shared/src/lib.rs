//! # Todo Shared Library
//!
//! Core of the todo backend: credential storage, session tokens, the
//! ownership index and the list/item services. The HTTP server in `todo-api`
//! is a thin layer over this crate.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, JWTs, request identity, ownership checks
//! - `db`: connection pool and migrations
//! - `models`: rows and queries for users, lists, items and link tables
//! - `services`: authenticator, list service, item service
//! - `error`: the service error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
