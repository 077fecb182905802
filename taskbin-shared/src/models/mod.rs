/// Database models for taskbin
///
/// Each model owns its table and exposes its store operations as associated
/// functions over a shared `PgPool`. Every statement is parameterized; every
/// task mutation is keyed by `(user_id, id)` so cross-user interference is
/// structurally impossible.
///
/// # Models
///
/// - `user`: account records, registration, and credential verification
/// - `task`: per-user to-do items
///
/// # Example
///
/// ```no_run
/// use taskbin_shared::models::user::{CreateUser, User};
/// use taskbin_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         password: "correct horse battery staple".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
