use std::future::Future;

#[cfg(feature = "postgres")]
use crate::postgres::{self, PgPooledConnection};
#[cfg(feature = "sqlite")]
use crate::sqlite::{self, SqlitePooledConnection};

use super::types::StorePool;
use crate::error::CatalogDbError;
use crate::executor::StatementExecutor;
use crate::raw_query::RawQuery;
use crate::results::ResultSet;
use crate::translation::PlaceholderStyle;
use crate::types::RowValues;

/// A connection checked out of a [`StorePool`].
pub enum StoreConnection {
    #[cfg(feature = "postgres")]
    Postgres {
        client: PgPooledConnection,
        translate_placeholders: bool,
    },
    #[cfg(feature = "sqlite")]
    Sqlite {
        conn: SqlitePooledConnection,
        translate_placeholders: bool,
    },
}

impl std::fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres { .. } => f.debug_tuple("Postgres").field(&"<Client>").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite { .. } => f.debug_tuple("Sqlite").field(&"<Connection>").finish(),
            #[allow(unreachable_patterns)]
            _ => f.write_str("StoreConnection"),
        }
    }
}

impl StorePool {
    /// Get a connection from the pool.
    ///
    /// # Errors
    /// Returns the pool error if the pool fails to provide a connection.
    pub async fn get_connection(
        pool: &StorePool,
        translate_placeholders: bool,
    ) -> Result<StoreConnection, CatalogDbError> {
        match pool {
            #[cfg(feature = "postgres")]
            StorePool::Postgres(pool) => {
                let client = pool.get_owned().await?;
                Ok(StoreConnection::Postgres {
                    client,
                    translate_placeholders,
                })
            }
            #[cfg(feature = "sqlite")]
            StorePool::Sqlite(pool) => {
                let conn = pool.get_owned().await?;
                Ok(StoreConnection::Sqlite {
                    conn,
                    translate_placeholders,
                })
            }
            #[allow(unreachable_patterns)]
            _ => Err(CatalogDbError::Unimplemented(
                "This database type is not enabled in the current build".to_string(),
            )),
        }
    }
}

impl StoreConnection {
    /// The pool's default for translating raw passthrough SQL.
    #[must_use]
    pub fn translation_default(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            StoreConnection::Postgres {
                translate_placeholders,
                ..
            } => *translate_placeholders,
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite {
                translate_placeholders,
                ..
            } => *translate_placeholders,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Start a raw passthrough query on this connection.
    pub fn query<'conn, 'q>(&'conn mut self, sql: &'q str) -> RawQuery<'conn, 'q> {
        RawQuery::new(self, sql)
    }

    /// Execute a parameterless batch inside one transaction.
    ///
    /// # Errors
    /// Returns the store error; nothing from the batch is kept.
    pub async fn execute_batch(&mut self, query: &str) -> Result<(), CatalogDbError> {
        self.query(query).batch().await
    }

    /// Execute a raw SELECT, translating placeholders per the pool default.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn execute_select(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, CatalogDbError> {
        self.query(query).params(params).select().await
    }

    /// Execute a raw DML statement and return rows affected.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn execute_dml(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, CatalogDbError> {
        self.query(query).params(params).dml().await
    }

    pub(crate) async fn select_native(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, CatalogDbError> {
        match self {
            #[cfg(feature = "postgres")]
            StoreConnection::Postgres { client, .. } => {
                postgres::select(client, query, params).await
            }
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite { conn, .. } => sqlite::select(conn, query, params).await,
            #[allow(unreachable_patterns)]
            _ => Err(not_enabled()),
        }
    }

    pub(crate) async fn dml_native(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, CatalogDbError> {
        match self {
            #[cfg(feature = "postgres")]
            StoreConnection::Postgres { client, .. } => postgres::dml(client, query, params).await,
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite { conn, .. } => sqlite::dml(conn, query, params).await,
            #[allow(unreachable_patterns)]
            _ => Err(not_enabled()),
        }
    }

    pub(crate) async fn batch_native(&mut self, query: &str) -> Result<(), CatalogDbError> {
        match self {
            #[cfg(feature = "postgres")]
            StoreConnection::Postgres { client, .. } => {
                postgres::execute_batch(client, query).await
            }
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite { conn, .. } => sqlite::execute_batch(conn, query).await,
            #[allow(unreachable_patterns)]
            _ => Err(not_enabled()),
        }
    }
}

impl StatementExecutor for StoreConnection {
    fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            #[cfg(feature = "postgres")]
            StoreConnection::Postgres { .. } => PlaceholderStyle::Postgres,
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite { .. } => PlaceholderStyle::Sqlite,
            #[allow(unreachable_patterns)]
            _ => PlaceholderStyle::Postgres,
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn fetch(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> impl Future<Output = Result<ResultSet, CatalogDbError>> + Send {
        self.select_native(sql, params)
    }
}

fn not_enabled() -> CatalogDbError {
    CatalogDbError::Unimplemented(
        "This database type is not enabled in the current build".to_string(),
    )
}
