/// PostgreSQL connection pool
///
/// The pool is the one shared mutable resource in the backend. Store
/// operations borrow a connection per statement; sqlx returns it on every
/// exit path, including statement failure, and callers waiting on an
/// exhausted pool block only until the acquire timeout fires
/// (`sqlx::Error::PoolTimedOut`). Transient acquire failures are retried
/// inside sqlx, never by the stores.
///
/// # Example
///
/// ```no_run
/// use taskbin_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(PoolConfig::new(std::env::var("DATABASE_URL").unwrap())).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Pool sizing and connection lifecycle knobs
///
/// Timeouts are plain seconds so they can come straight from environment
/// variables.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Upper bound on open connections
    pub max_connections: u32,

    /// Idle connections kept warm
    pub min_connections: u32,

    /// How long a caller may wait for a free connection before
    /// `PoolTimedOut`
    pub acquire_timeout_seconds: u64,

    /// Close connections idle longer than this; `None` keeps them forever
    pub idle_timeout_seconds: Option<u64>,

    /// Recycle connections older than this; `None` disables recycling
    pub max_lifetime_seconds: Option<u64>,

    /// Ping a connection before handing it out
    pub test_before_acquire: bool,
}

impl PoolConfig {
    /// Config for `url` with the default sizing
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
            test_before_acquire: true,
        }
    }
}

/// Opens a pool and proves the database answers
///
/// An unreachable or misconfigured database fails here, at startup, rather
/// than on the first request that happens to need a connection.
pub async fn create_pool(config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_seconds = config.acquire_timeout_seconds,
        "opening database pool"
    );

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .test_before_acquire(config.test_before_acquire);

    if let Some(secs) = config.idle_timeout_seconds {
        options = options.idle_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.max_lifetime_seconds {
        options = options.max_lifetime(Duration::from_secs(secs));
    }

    let pool = options.connect(&config.url).await?;
    health_check(&pool).await?;

    info!("database pool ready");
    Ok(pool)
}

/// One round-trip through the pool
///
/// Cheap enough for a liveness probe; also run once by [`create_pool`].
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("database health check");

    let answer: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    if answer != 1 {
        return Err(sqlx::Error::Protocol(
            format!("health check query answered {answer}").into(),
        ));
    }

    Ok(())
}

/// Drains and closes the pool during shutdown
pub async fn close_pool(pool: PgPool) {
    info!("closing database pool");
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizing() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout_seconds, 30);
        assert!(config.test_before_acquire);
    }

    #[test]
    fn new_keeps_defaults_but_sets_url() {
        let config = PoolConfig::new("postgresql://localhost/taskbin");

        assert_eq!(config.url, "postgresql://localhost/taskbin");
        assert_eq!(config.idle_timeout_seconds, Some(600));
        assert_eq!(config.max_lifetime_seconds, Some(1800));
    }

    // Anything touching a live pool lives in this crate's tests/ directory.
}
