/// Argon2id password hashing
///
/// A credential is stored only as a PHC string (`$argon2id$v=19$...`): the
/// algorithm, cost parameters, and per-password salt all travel inside the
/// hash, so verification needs nothing but the stored string. Comparison is
/// constant-time.
///
/// # Example
///
/// ```
/// use taskbin_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stored = hash_password("correct horse battery staple")?;
/// assert!(verify_password("correct horse battery staple", &stored)?);
/// assert!(!verify_password("correct horse battery", &stored)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Memory cost in KiB (64 MiB)
const MEMORY_KIB: u32 = 65536;

/// Iteration count
const PASSES: u32 = 3;

/// Lanes of parallelism
const LANES: u32 = 4;

/// Digest length in bytes
const TAG_LEN: usize = 32;

/// Failures of the hashing layer
///
/// A wrong password is not an error; it is `Ok(false)` from
/// [`verify_password`]. Errors mean the operation itself could not run.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hash computation failed
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored hash is not a parseable PHC string
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_KIB, PASSES, LANES, Some(TAG_LEN))
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password into a PHC string
///
/// Each call draws a fresh 16-byte salt from the OS RNG, so hashing the
/// same password twice yields different strings.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a plaintext password against a stored PHC string
///
/// `Ok(false)` means the password does not match. A stored string that
/// cannot be parsed is [`PasswordError::Malformed`], never a mismatch.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::Malformed(e.to_string()))?;

    match hasher()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phc_string_carries_parameters() {
        let stored = hash_password("a password").unwrap();

        assert!(stored.starts_with("$argon2id$v=19$"));
        assert!(stored.contains("m=65536,t=3,p=4"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("repeated").unwrap();
        let b = hash_password("repeated").unwrap();

        // Fresh salt every call
        assert_ne!(a, b);
    }

    #[test]
    fn matching_password_verifies() {
        let stored = hash_password("open sesame").unwrap();
        assert!(verify_password("open sesame", &stored).unwrap());
    }

    #[test]
    fn wrong_and_empty_passwords_are_ok_false() {
        let stored = hash_password("open sesame").unwrap();

        assert!(!verify_password("open saysme", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("anything", "argon2-but-not-really");
        assert!(matches!(result, Err(PasswordError::Malformed(_))));
    }

    #[test]
    fn unicode_passwords_roundtrip() {
        for password in ["naïve", "密码", "🔑🔑🔑", "with spaces and ünïcode"] {
            let stored = hash_password(password).unwrap();
            assert!(
                verify_password(password, &stored).unwrap(),
                "{password} failed to verify"
            );
        }
    }
}
