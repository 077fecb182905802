/// Task model and store operations
///
/// Owns the `tasks` table. Tasks are identified by the composite key
/// `(user_id, id)`: a task cannot exist without an owner and is never
/// reassigned. Every mutation matches on both columns, so an update or
/// delete keyed to the wrong owner affects zero rows; the affected-row
/// count is surfaced to the caller instead of being swallowed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID NOT NULL DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     status TEXT NOT NULL DEFAULT 'not_done',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (user_id, id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Status assigned to every task at creation
///
/// Status is a free-form string; no enumerated constraint is enforced.
pub const DEFAULT_STATUS: &str = "not_done";

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, generated at creation, immutable
    pub id: Uuid,

    /// Owning user; part of the task's identity key
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Free-form status string; [`DEFAULT_STATUS`] at creation
    pub status: String,

    /// When the task was created; immutable, the listing sort key
    pub created_at: DateTime<Utc>,

    /// Refreshed on every field mutation, not on read
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

impl Task {
    /// Creates a new task for a user
    ///
    /// Status starts as [`DEFAULT_STATUS`]; `created_at` and `updated_at`
    /// are assigned from the same statement clock, so they are equal at
    /// creation. Always succeeds barring backend faults.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(DEFAULT_STATUS)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, newest first
    ///
    /// Ordered by `created_at` descending; ties may appear in any stable
    /// order. Empty vec when the user has no tasks.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Renames a task
    ///
    /// Returns `true` if a task matching `(user_id, task_id)` was updated,
    /// `false` when no row matched (wrong id or wrong owner).
    pub async fn update_title(
        pool: &PgPool,
        user_id: Uuid,
        task_id: Uuid,
        title: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(title)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces a task's description
    ///
    /// Same matching and return contract as [`Task::update_title`].
    pub async fn update_description(
        pool: &PgPool,
        user_id: Uuid,
        task_id: Uuid,
        description: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET description = $3, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(description)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets a task's status
    ///
    /// Any string is accepted. Same matching and return contract as
    /// [`Task::update_title`].
    pub async fn update_status(
        pool: &PgPool,
        user_id: Uuid,
        task_id: Uuid,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = $3, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(status)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task
    ///
    /// Conditional on both keys; returns `true` if a row was removed.
    /// Deleting an already-deleted task returns `false`.
    pub async fn delete(pool: &PgPool, user_id: Uuid, task_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(task_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        assert_eq!(DEFAULT_STATUS, "not_done");
    }

    #[test]
    fn test_create_task_struct() {
        let create_task = CreateTask {
            user_id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: "2% or whole".to_string(),
        };

        assert_eq!(create_task.title, "Buy milk");
        assert_eq!(create_task.description, "2% or whole");
    }

    // Store operations are covered by tests/task_store_tests.rs against a
    // live database.
}
