use std::sync::Arc;

use tokio::task::spawn_blocking;

use crate::error::CatalogDbError;
use crate::results::ResultSet;
use crate::types::RowValues;

use super::config::{SharedSqliteConnection, SqlitePooledConnection};
use super::params::Params;

/// Run a SELECT (or a write with `RETURNING`) and materialize every row.
///
/// # Errors
/// Returns `CatalogDbError` if preparing, binding or stepping fails.
pub async fn select(
    conn: &mut SqlitePooledConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, CatalogDbError> {
    let converted = Params::convert(params)?;
    let sql_owned = query.to_owned();
    let handle = Arc::clone(&**conn);
    run_blocking(handle, move |guard| {
        let mut stmt = guard.prepare(&sql_owned)?;
        super::query::build_result_set(&mut stmt, converted.as_values())
    })
    .await
}

/// Execute a DML statement and return rows affected.
///
/// # Errors
/// Returns `CatalogDbError` if the statement fails.
pub async fn dml(
    conn: &mut SqlitePooledConnection,
    query: &str,
    params: &[RowValues],
) -> Result<usize, CatalogDbError> {
    let converted = Params::convert(params)?;
    let sql_owned = query.to_owned();
    let handle = Arc::clone(&**conn);
    run_blocking(handle, move |guard| {
        let mut stmt = guard.prepare(&sql_owned)?;
        let affected = stmt.execute(&converted.as_refs()[..])?;
        Ok(affected)
    })
    .await
}

/// Execute a parameterless batch inside one transaction.
///
/// # Errors
/// Returns `CatalogDbError` if any statement fails; the batch is rolled back.
pub async fn execute_batch(
    conn: &mut SqlitePooledConnection,
    query: &str,
) -> Result<(), CatalogDbError> {
    let sql_owned = query.to_owned();
    let handle = Arc::clone(&**conn);
    run_blocking(handle, move |guard| {
        let tx = guard.transaction()?;
        tx.execute_batch(&sql_owned)?;
        tx.commit()?;
        Ok(())
    })
    .await
}

/// Run synchronous `rusqlite` logic on the blocking pool.
pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, CatalogDbError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, CatalogDbError> + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| CatalogDbError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
