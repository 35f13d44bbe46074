use std::future::Future;

use bb8::{ManageConnection, Pool, PooledConnection};
use deadpool_postgres::Config as PgConfig;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, warn};

use crate::error::CatalogDbError;
use crate::pool::{ConfigAndPool, StorePool};
use crate::types::DatabaseType;

pub type PgPooledConnection = PooledConnection<'static, PgManager>;

/// bb8 manager for Postgres clients.
#[derive(Debug, Clone)]
pub struct PgManager {
    pub(crate) config: tokio_postgres::Config,
}

impl PgManager {
    #[must_use]
    pub fn new(config: tokio_postgres::Config) -> Self {
        Self { config }
    }

    /// Build a pool from this manager.
    ///
    /// # Errors
    /// Returns `CatalogDbError` if pool creation fails.
    pub async fn build_pool(self) -> Result<Pool<PgManager>, CatalogDbError> {
        Pool::builder()
            .build(self)
            .await
            .map_err(|e| CatalogDbError::ConnectionError(format!("postgres pool error: {e}")))
    }
}

impl ManageConnection for PgManager {
    type Connection = Client;
    type Error = tokio_postgres::Error;

    #[allow(clippy::manual_async_fn)]
    fn connect(&self) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send {
        let cfg = self.config.clone();
        async move {
            debug!(
                hosts = ?cfg.get_hosts(),
                db = ?cfg.get_dbname(),
                user = ?cfg.get_user(),
                "postgres connect start"
            );
            let (client, connection) = cfg.connect(NoTls).await?;
            debug!("postgres connect established");
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    warn!(error = %e, "postgres connection task ended");
                }
            });
            Ok(client)
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn is_valid(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move { conn.simple_query("SELECT 1").await.map(|_| ()) }
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        conn.is_closed()
    }
}

impl ConfigAndPool {
    /// Asynchronous initializer for `ConfigAndPool` with Postgres.
    ///
    /// # Errors
    /// Returns `CatalogDbError::ConfigError` if required config fields are missing
    /// or `CatalogDbError::ConnectionError` if pool creation fails.
    pub async fn new_postgres(pg_config: PgConfig) -> Result<Self, CatalogDbError> {
        Self::new_postgres_with_translation(pg_config, false).await
    }

    /// Asynchronous initializer for `ConfigAndPool` with Postgres and a translation default.
    ///
    /// # Errors
    /// Returns `CatalogDbError::ConfigError` if required config fields are missing
    /// or `CatalogDbError::ConnectionError` if pool creation fails.
    pub async fn new_postgres_with_translation(
        pg_config: PgConfig,
        translate_placeholders: bool,
    ) -> Result<Self, CatalogDbError> {
        let missing = [
            ("dbname", pg_config.dbname.is_none()),
            ("host", pg_config.host.is_none()),
            ("port", pg_config.port.is_none()),
            ("user", pg_config.user.is_none()),
            ("password", pg_config.password.is_none()),
        ];
        if let Some((field, _)) = missing.iter().find(|(_, absent)| *absent) {
            return Err(CatalogDbError::ConfigError(format!("{field} is required")));
        }

        let tokio_cfg = pg_config
            .get_pg_config()
            .map_err(|e| CatalogDbError::ConfigError(format!("postgres config error: {e}")))?;
        let pool = PgManager::new(tokio_cfg).build_pool().await?;

        Ok(ConfigAndPool {
            pool: StorePool::Postgres(pool),
            db_type: DatabaseType::Postgres,
            translate_placeholders,
        })
    }
}
