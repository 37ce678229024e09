//! SQLite connection pool with the roster schema applied.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

use super::SqlitePlayerRepository;
use crate::persistence::PersistenceError;

const MAX_CONNECTIONS: u32 = 5;
/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool over the roster database. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open `path`, creating the file and its parent directories when
    /// missing, and bring the schema up to date.
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self::connect(options, MAX_CONNECTIONS).await?;
        tracing::info!(path = %path.display(), "SQLite database ready");
        Ok(db)
    }

    /// Private database living as long as the pool.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        use std::str::FromStr;

        // Every `:memory:` connection is its own database, so keep one.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options, 1).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, PersistenceError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Player store sharing this pool.
    pub fn players(&self) -> SqlitePlayerRepository {
        SqlitePlayerRepository::new(self.pool.clone())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for in-flight statements and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
