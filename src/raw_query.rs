//! Caller-written SQL on a pooled connection.

use std::borrow::Cow;

use tracing::debug;

use crate::error::CatalogDbError;
use crate::executor::StatementExecutor;
use crate::pool::StoreConnection;
use crate::results::ResultSet;
use crate::translation::{TranslationMode, translate_placeholders};
use crate::types::RowValues;

/// Fluent builder for raw query execution with optional placeholder translation.
///
/// ```rust,no_run
/// use catalog_db::prelude::*;
///
/// # async fn demo(conn: &mut StoreConnection) -> Result<(), CatalogDbError> {
/// let rows = conn
///     .query("SELECT * FROM users WHERE email = $1")
///     .params(&[RowValues::Text("ana@example.com".into())])
///     .translation(TranslationMode::ForceOn)
///     .select()
///     .await?;
/// # let _ = rows;
/// # Ok(())
/// # }
/// ```
pub struct RawQuery<'conn, 'q> {
    conn: &'conn mut StoreConnection,
    sql: &'q str,
    params: &'q [RowValues],
    translation: TranslationMode,
}

impl<'conn, 'q> RawQuery<'conn, 'q> {
    pub(crate) fn new(conn: &'conn mut StoreConnection, sql: &'q str) -> Self {
        Self {
            conn,
            sql,
            params: &[],
            translation: TranslationMode::default(),
        }
    }

    /// Provide parameters for this statement.
    #[must_use]
    pub fn params(mut self, params: &'q [RowValues]) -> Self {
        self.params = params;
        self
    }

    /// Override translation mode for this call.
    #[must_use]
    pub fn translation(mut self, translation: TranslationMode) -> Self {
        self.translation = translation;
        self
    }

    fn translated(&self) -> Cow<'q, str> {
        let enabled = self.translation.resolve(self.conn.translation_default());
        translate_placeholders(self.sql, self.conn.placeholder_style(), enabled)
    }

    /// Execute a SELECT (or a write with `RETURNING`) and return the result set.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn select(self) -> Result<ResultSet, CatalogDbError> {
        let sql = self.translated();
        debug!(sql = %sql, params = self.params.len(), "raw select");
        let result = self.conn.select_native(&sql, self.params).await?;
        debug!(rows = result.len(), "raw select returned");
        Ok(result)
    }

    /// Execute a DML statement and return rows affected.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn dml(self) -> Result<usize, CatalogDbError> {
        let sql = self.translated();
        debug!(sql = %sql, params = self.params.len(), "raw dml");
        let affected = self.conn.dml_native(&sql, self.params).await?;
        debug!(affected, "raw dml done");
        Ok(affected)
    }

    /// Execute a batch; params and translation do not apply.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn batch(self) -> Result<(), CatalogDbError> {
        debug!(sql = %self.sql, "raw batch");
        self.conn.batch_native(self.sql).await
    }
}
