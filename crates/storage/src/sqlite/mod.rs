use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{CompletionRepository, ProgressRepository, Storage};

mod completion_repo;
mod mapping;
mod migrate;
mod progress_repo;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// `SQLite` backend for lesson progress and the completion history.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A private in-memory database lives and dies with its connection, so such
/// URLs get a pool of one.
fn pool_size(database_url: &str) -> u32 {
    let memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    if memory && !database_url.contains("cache=shared") {
        1
    } else {
        MAX_CONNECTIONS
    }
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// Every pooled connection runs in WAL mode with a busy timeout so the
    /// UI's background saves do not trip over each other.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or a
    /// connection PRAGMA fails.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let max_connections = pool_size(database_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(url = database_url, max_connections, "sqlite pool ready");
        Ok(Self { pool })
    }

    /// Connect and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connecting or migrating fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo);
        Ok(Self {
            progress,
            completions,
        })
    }
}
