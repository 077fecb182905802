/// Schema migrations
///
/// Applying the schema is an explicit startup step owned by the API
/// binary, never a side effect of importing this crate. The DDL lives in
/// the workspace-root `migrations/` directory; sqlx records applied
/// versions in `_sqlx_migrations`, so running again changes nothing.

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{info, warn};

/// Brings the schema up to date, idempotently
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("applying schema migrations");

    sqlx::migrate!("../migrations").run(pool).await.map_err(|e| {
        warn!(error = %e, "schema migration failed");
        e
    })?;

    info!("schema is current");
    Ok(())
}

/// Creates the target database when it is missing
///
/// A development and test convenience; production databases are
/// provisioned ahead of time.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        return Ok(());
    }

    info!("creating missing database");
    Postgres::create_database(database_url).await
}
