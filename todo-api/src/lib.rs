//! # Todo API Server Library
//!
//! HTTP surface of the todo backend: configuration, router, error mapping
//! and route handlers. Business rules live in `todo-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
