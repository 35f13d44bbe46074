use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bb8::{ManageConnection, Pool, PooledConnection};
use tracing::debug;

use crate::error::CatalogDbError;
use crate::pool::{ConfigAndPool, StorePool};
use crate::types::DatabaseType;

use super::connection::run_blocking;

/// Shared handle to one open `SQLite` connection.
pub type SharedSqliteConnection = Arc<tokio::sync::Mutex<rusqlite::Connection>>;
pub type SqlitePooledConnection = PooledConnection<'static, SqliteManager>;

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY: &str = ":memory:";

/// Options for configuring a `SQLite` pool.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub translate_placeholders: bool,
    pub pool_size: u32,
    pub busy_timeout: Duration,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            translate_placeholders: false,
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translate_placeholders: bool) -> Self {
        self.translate_placeholders = translate_placeholders;
        self
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn translation(mut self, translate_placeholders: bool) -> Self {
        self.opts.translate_placeholders = translate_placeholders;
        self
    }

    #[must_use]
    pub fn pool_size(mut self, pool_size: u32) -> Self {
        self.opts.pool_size = pool_size;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = busy_timeout;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Build a `ConfigAndPool` for `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogDbError` if the database cannot be opened.
    pub async fn build(self) -> Result<ConfigAndPool, CatalogDbError> {
        ConfigAndPool::new_sqlite(self.finish()).await
    }
}

/// bb8 manager opening `SQLite` connections on the blocking pool.
///
/// An in-memory manager holds one shared connection and hands out clones of it,
/// so a reconnect never lands on a fresh, empty database.
#[derive(Debug, Clone)]
pub struct SqliteManager {
    path: String,
    busy_timeout: Duration,
    shared: Option<SharedSqliteConnection>,
}

impl SqliteManager {
    #[must_use]
    pub fn new(path: String, busy_timeout: Duration) -> Self {
        Self {
            path,
            busy_timeout,
            shared: None,
        }
    }

    /// Open `:memory:` once and keep it for the lifetime of the manager.
    ///
    /// # Errors
    /// Returns `CatalogDbError` if the connection cannot be opened.
    pub async fn in_memory(busy_timeout: Duration) -> Result<Self, CatalogDbError> {
        let conn = open_connection(IN_MEMORY.to_string(), busy_timeout).await?;
        Ok(Self {
            path: IN_MEMORY.to_string(),
            busy_timeout,
            shared: Some(conn),
        })
    }
}

async fn open_connection(
    path: String,
    busy_timeout: Duration,
) -> Result<SharedSqliteConnection, CatalogDbError> {
    debug!(path = %path, "opening sqlite connection");
    let conn = tokio::task::spawn_blocking(move || -> Result<_, CatalogDbError> {
        let conn = rusqlite::Connection::open(&path)?;
        conn.busy_timeout(busy_timeout)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "sqlite connection ready");
        Ok(conn)
    })
    .await
    .map_err(|e| CatalogDbError::ConnectionError(format!("sqlite open join error: {e}")))??;
    Ok(Arc::new(tokio::sync::Mutex::new(conn)))
}

impl ManageConnection for SqliteManager {
    type Connection = SharedSqliteConnection;
    type Error = CatalogDbError;

    #[allow(clippy::manual_async_fn)]
    fn connect(&self) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send {
        let path = self.path.clone();
        let busy_timeout = self.busy_timeout;
        let shared = self.shared.clone();
        async move {
            match shared {
                Some(conn) => Ok(conn),
                None => open_connection(path, busy_timeout).await,
            }
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn is_valid(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let handle = Arc::clone(conn);
        async move {
            run_blocking(handle, |guard| {
                guard
                    .query_row("SELECT 1", [], |_| Ok(()))
                    .map_err(CatalogDbError::SqliteError)
            })
            .await
        }
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

impl ConfigAndPool {
    #[must_use]
    pub fn sqlite_builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Asynchronous initializer for `ConfigAndPool` with `SQLite` using bb8.
    ///
    /// An in-memory path gets a single-connection pool that never reaps its
    /// connection, so every checkout sees the same database.
    ///
    /// # Errors
    /// Returns `CatalogDbError` if the pool cannot be built or the first
    /// connection fails to open.
    pub async fn new_sqlite(opts: SqliteOptions) -> Result<Self, CatalogDbError> {
        if opts.pool_size == 0 {
            return Err(CatalogDbError::ConfigError(
                "sqlite pool_size must be at least 1".into(),
            ));
        }
        let pool = if opts.db_path == IN_MEMORY {
            let manager = SqliteManager::in_memory(opts.busy_timeout).await?;
            Pool::builder()
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
                .retry_connection(false)
                .build(manager)
                .await?
        } else {
            let manager = SqliteManager::new(opts.db_path, opts.busy_timeout);
            Pool::builder()
                .max_size(opts.pool_size)
                .retry_connection(false)
                .build(manager)
                .await?
        };

        // Fail fast on an unopenable path instead of at first use.
        {
            let conn = pool.get().await?;
            drop(conn);
        }

        Ok(ConfigAndPool {
            pool: StorePool::Sqlite(pool),
            db_type: DatabaseType::Sqlite,
            translate_placeholders: opts.translate_placeholders,
        })
    }
}
