/// Request context resolution
///
/// Turns the `Authorization: Bearer <token>` header of an inbound request into
/// an [`AuthContext`] carrying the caller's user id. Token checks are delegated
/// to [`Authenticator::verify_token`]; nothing here decodes tokens itself.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use todo_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("user {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};

use crate::error::ServiceError;
use crate::services::auth::Authenticator;

/// Identity of the caller, inserted into request extensions after authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i64,
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token failed verification
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Extracts the raw token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("header is not valid ASCII".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("token is empty".to_string()));
    }

    Ok(token)
}

impl AuthContext {
    /// Resolves the caller from request headers
    pub fn resolve(headers: &HeaderMap, authenticator: &Authenticator) -> Result<Self, AuthError> {
        let token = bearer_token(headers)?;

        let user_id = authenticator.verify_token(token).map_err(|e| match e {
            ServiceError::Unauthorized(msg) => AuthError::InvalidToken(msg),
            other => AuthError::InvalidToken(other.to_string()),
        })?;

        Ok(Self { user_id })
    }
}
