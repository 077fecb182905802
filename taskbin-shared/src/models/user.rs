/// User model and store operations
///
/// Owns the `users` table: registration, point lookups, and credential
/// verification. Passwords are stored as Argon2id hashes, never in plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_username_key UNIQUE (username)
/// );
/// ```
///
/// Username uniqueness is the constraint, not a lookup-before-insert: two
/// concurrent registrations with the same name cannot both succeed, and the
/// loser observes [`UserError::DuplicateUsername`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, PasswordError};

/// Typed failures of the user store
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The username is already registered
    #[error("Username is already taken")]
    DuplicateUsername,

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Backend fault (pool exhausted, connection lost, statement failure)
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, generated at creation, immutable
    pub id: Uuid,

    /// Username, unique across all users
    pub username: String,

    /// Argon2id password hash (PHC string)
    pub password_hash: String,

    /// When the account was created; immutable
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// Carries the plaintext password; hashing happens inside [`User::create`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

/// True when the error is the unique-username constraint firing
fn is_username_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.constraint())
        .map(|constraint| constraint.contains("username"))
        .unwrap_or(false)
}

impl User {
    /// Registers a new user
    ///
    /// Hashes the password with a fresh random salt and inserts the record;
    /// the database generates the id and creation timestamp.
    ///
    /// # Errors
    ///
    /// - [`UserError::DuplicateUsername`] if the username is already taken;
    ///   the store is left unchanged
    /// - [`UserError::Password`] if hashing fails
    /// - [`UserError::Database`] on backend faults
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, UserError> {
        let password_hash = hash_password(&data.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(&data.username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_username_conflict(&e) {
                UserError::DuplicateUsername
            } else {
                UserError::Database(e)
            }
        })?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns `None` when no such user exists.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Lookup goes through the unique username index; same absence contract
    /// as [`User::find_by_id`].
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Verifies a username/password pair
    ///
    /// Returns the user on a match. Unknown username and wrong password both
    /// yield `Ok(None)`; the return value never distinguishes the two, so
    /// callers cannot enumerate registered usernames through this path.
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<Option<Self>, UserError> {
        let Some(user) = Self::find_by_username(pool, username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            username: "alice".to_string(),
            password: "hunter22hunter22".to_string(),
        };

        assert_eq!(create_user.username, "alice");
    }

    #[test]
    fn test_duplicate_username_display() {
        let err = UserError::DuplicateUsername;
        assert_eq!(err.to_string(), "Username is already taken");
    }

    // Store operations are covered by tests/user_store_tests.rs against a
    // live database.
}
