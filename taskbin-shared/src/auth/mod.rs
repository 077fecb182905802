/// Authentication primitives for taskbin
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Signed session tokens (HS256) resolved to a user id per request
///
/// # Example
///
/// ```no_run
/// use taskbin_shared::auth::password::{hash_password, verify_password};
/// use taskbin_shared::auth::token::{issue_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4());
/// let token = issue_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
