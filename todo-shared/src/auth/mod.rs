/// Authentication and authorization primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 session token creation and validation
/// - [`middleware`]: resolving the caller's identity from a bearer token
/// - [`authorization`]: ownership checks over the link tables
///
/// # Example
///
/// ```
/// use todo_shared::auth::password::{hash_password, verify_password};
/// use todo_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("pw123")?;
/// assert!(verify_password("pw123", &hash)?);
///
/// let secret = "a-secret-of-at-least-thirty-two-bytes!";
/// let token = create_token(&Claims::new(1, Duration::hours(12)), secret)?;
/// assert_eq!(validate_token(&token, secret)?.sub, 1);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
