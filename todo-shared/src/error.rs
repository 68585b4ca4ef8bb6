/// Error taxonomy shared by the authenticator and the list/item services
///
/// | Variant | Meaning |
/// |---|---|
/// | `InvalidInput` | Payload failed validation; nothing was written |
/// | `Unauthorized` | Bad credentials or an invalid/expired token |
/// | `NotFound` | Resource is missing **or** not owned by the caller |
/// | `Conflict` | Username already registered |
/// | `Internal` | Store failure or broken invariant |
///
/// `NotFound` covers both "absent" and "someone else's": the
/// message names only the resource kind.

use validator::ValidationErrors;

use crate::auth::{authorization::AuthzError, jwt::JwtError, password::PasswordError};

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// `NotFound` for a todo list
    pub fn list_not_found() -> Self {
        ServiceError::NotFound("list")
    }

    /// `NotFound` for a todo item
    pub fn item_not_found() -> Self {
        ServiceError::NotFound("item")
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Internal(format!("Database error: {}", err))
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());

                    if *field == "__all__" {
                        message
                    } else {
                        format!("{}: {}", field, message)
                    }
                })
            })
            .collect();

        // HashMap order is random
        messages.sort();

        ServiceError::InvalidInput(messages.join("; "))
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for ServiceError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => ServiceError::Internal(msg),
            JwtError::Expired => ServiceError::Unauthorized("token expired".to_string()),
            JwtError::InvalidIssuer => ServiceError::Unauthorized("invalid token issuer".to_string()),
            JwtError::ValidationError(_) => ServiceError::Unauthorized("invalid token".to_string()),
        }
    }
}

/// Ownership failures become `NotFound` for the given resource kind
pub(crate) fn authz_to_service(err: AuthzError, resource: &'static str) -> ServiceError {
    match err {
        AuthzError::NotOwner => ServiceError::NotFound(resource),
        AuthzError::DatabaseError(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
    }

    #[test]
    fn test_validation_errors_become_invalid_input() {
        let errors = Payload { title: String::new() }.validate().unwrap_err();

        match ServiceError::from(errors) {
            ServiceError::InvalidInput(msg) => assert_eq!(msg, "title: must not be empty"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_not_owner_collapses_to_not_found() {
        let err = authz_to_service(AuthzError::NotOwner, "list");
        assert!(matches!(err, ServiceError::NotFound("list")));
        assert_eq!(err.to_string(), "list not found");
    }

    #[test]
    fn test_jwt_errors_are_unauthorized() {
        assert!(matches!(ServiceError::from(JwtError::Expired), ServiceError::Unauthorized(_)));
        assert!(matches!(
            ServiceError::from(JwtError::ValidationError("bad signature".to_string())),
            ServiceError::Unauthorized(_)
        ));
        assert!(matches!(
            ServiceError::from(JwtError::CreateError("boom".to_string())),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn test_store_errors_are_internal() {
        assert!(matches!(
            ServiceError::from(sqlx::Error::PoolTimedOut),
            ServiceError::Internal(_)
        ));
    }
}
