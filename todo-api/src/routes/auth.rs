/// Authentication endpoints
///
/// - `POST /auth/sign-up`: register a user, returns `{"id": ...}`
/// - `POST /auth/sign-in`: exchange credentials for `{"token": ...}`
///
/// Validation, hashing and token issue live in
/// [`Authenticator`](todo_shared::services::auth::Authenticator); these
/// handlers only translate HTTP to service calls.

use crate::{app::AppState, error::ApiResult, routes::IdResponse};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use todo_shared::services::auth::{SignInInput, SignUpInput};

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Bearer token for the `/api` routes
    pub token: String,
}

/// Registers a new user
///
/// ```text
/// POST /auth/sign-up
/// {"username": "bob", "name": "Bob", "password": "pw123"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty field or malformed body
/// - `409 Conflict`: username already exists
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpInput>, JsonRejection>,
) -> ApiResult<Json<IdResponse>> {
    let Json(input) = payload?;

    let id = state.auth.register(input).await?;

    Ok(Json(IdResponse { id }))
}

/// Signs a user in
///
/// ```text
/// POST /auth/sign-in
/// {"username": "bob", "password": "pw123"}
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown username or wrong password (same message)
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInInput>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(input) = payload?;

    let token = state.auth.sign_in(&input.username, &input.password).await?;

    Ok(Json(TokenResponse { token }))
}
