use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

/// Establishes a read-only connection pool to the SQLite journal.
///
/// The returned pool is meant to be injected into
/// [`crate::JournalRepository::new`] and shut down with [`close`] when the
/// application exits.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::new()
        .filename(&settings.path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    info!(path = %settings.path, "opened journal database read-only");
    Ok(pool)
}

/// Closes the pool, ending the explicit open/close lifecycle.
pub async fn close(pool: SqlitePool) {
    pool.close().await;
}
