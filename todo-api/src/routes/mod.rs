/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Sign-up and sign-in
/// - `lists`: Todo lists owned by the caller
/// - `items`: Todo items inside the caller's lists

pub mod auth;
pub mod health;
pub mod items;
pub mod lists;

use serde::Serialize;

/// `{"id": ...}` body returned by create endpoints
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i64,
}

/// `{"status": "ok"}` body returned by update and delete endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
