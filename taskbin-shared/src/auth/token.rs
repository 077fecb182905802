/// Signed session tokens
///
/// Login hands out an HS256 token; every task request presents it as
/// `Authorization: Bearer <token>` and middleware resolves it back to a
/// user id. The id itself never crosses the wire as a trusted input.
///
/// Tokens live 24 hours. Verification checks the signature, the
/// expiration and not-before instants, and the issuer.
///
/// # Example
///
/// ```
/// use taskbin_shared::auth::token::{issue_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "secret-key-at-least-32-bytes-long!!";
///
/// let token = issue_token(&Claims::new(user_id), secret)?;
/// assert_eq!(verify_token(&token, secret)?.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `iss` claim stamped into every token and required back
const ISSUER: &str = "taskbin";

/// Token lifetime in hours
const TOKEN_TTL_HOURS: i64 = 24;

/// Failures of the token layer
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signing failed
    #[error("could not sign token: {0}")]
    Sign(String),

    /// The token did not verify (bad signature, wrong issuer, garbage)
    #[error("token rejected: {0}")]
    Invalid(String),

    /// The token verified but its lifetime is over
    #[error("token expired")]
    Expired,
}

/// What a session token asserts
///
/// Standard JWT claims only; `sub` is the user id the token stands for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: Uuid,

    /// Issuer, always [`ISSUER`]
    pub iss: String,

    /// Issued-at, Unix seconds
    pub iat: i64,

    /// Expiration, Unix seconds
    pub exp: i64,

    /// Not-before, Unix seconds
    pub nbf: i64,
}

impl Claims {
    /// Claims for `user_id` with the standard lifetime
    pub fn new(user_id: Uuid) -> Self {
        Self::expiring_in(user_id, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Claims for `user_id` expiring after `ttl`
    pub fn expiring_in(user_id: Uuid, ttl: Duration) -> Self {
        let issued = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: issued.timestamp(),
            exp: (issued + ttl).timestamp(),
            nbf: issued.timestamp(),
        }
    }

    /// Whether the expiration instant has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

fn validation() -> Validation {
    let mut v = Validation::new(Algorithm::HS256);
    v.set_issuer(&[ISSUER]);
    v.validate_nbf = true;
    v
}

/// Signs `claims` with `secret` into the wire form
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Sign(e.to_string()))
}

/// Verifies a wire-form token and returns its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;

    Ok(decoded.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn fresh_claims_carry_subject_and_issuer() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "taskbin");
        assert!(!claims.is_expired());
    }

    #[test]
    fn issue_then_verify_roundtrips_the_subject() {
        let user_id = Uuid::new_v4();

        let token = issue_token(&Claims::new(user_id), SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();

        let result = verify_token(&token, "a-completely-different-secret-key!!");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let claims = Claims::expiring_in(Uuid::new_v4(), Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = issue_token(&claims, SECRET).unwrap();
        assert!(matches!(verify_token(&token, SECRET), Err(TokenError::Expired)));
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        assert!(matches!(
            verify_token("not.a.token", SECRET),
            Err(TokenError::Invalid(_))
        ));
    }
}
