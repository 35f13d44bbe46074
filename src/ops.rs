//! Async catalog operations: build a statement, run it on the injected executor.

use tracing::debug;

use crate::error::CatalogDbError;
use crate::executor::StatementExecutor;
use crate::options::{DeleteFilter, SelectOptions};
use crate::record::{FieldValue, ID_COLUMN, Record};
use crate::results::ResultSet;
use crate::statement::{
    Statement, build_batch_insert, build_exclude, build_id_lookup, build_insert, build_select,
    build_update,
};
use crate::types::RowValues;

async fn run<E>(conn: &mut E, stmt: Statement) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    debug!(sql = %stmt.sql, params = stmt.params.len(), "executing statement");
    let result = conn.fetch(&stmt.sql, &stmt.params).await?;
    debug!(rows = result.len(), "statement returned");
    Ok(result)
}

/// Insert one record and return the stored row.
///
/// # Errors
/// [`CatalogDbError::Validation`] for an empty record or invalid names, otherwise
/// whatever the store reports.
pub async fn insert<E>(
    table: &str,
    record: &Record,
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let stmt = build_insert(table, record, conn.placeholder_style())?;
    run(conn, stmt).await
}

/// Insert many same-shaped records in one statement and return every stored row.
///
/// # Errors
/// [`CatalogDbError::Validation`] for an empty or heterogeneous batch; store errors
/// otherwise. Nothing is inserted when the statement fails.
pub async fn batch_insert<E>(
    table: &str,
    records: &[Record],
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let stmt = build_batch_insert(table, records, conn.placeholder_style())?;
    run(conn, stmt).await
}

/// Update the row named by `record.id` and return it.
///
/// An id that matches no row yields an empty result, not an error.
///
/// # Errors
/// [`CatalogDbError::Validation`] if `id` is missing or nothing else is set.
pub async fn update<E>(
    table: &str,
    record: &Record,
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let stmt = build_update(table, record, conn.placeholder_style())?;
    run(conn, stmt).await
}

/// Update when a row with `record.id` exists, insert otherwise.
///
/// A record without `id` (or with a null one) is inserted without it so the store
/// assigns the key. The lookup and the write are separate statements; two callers
/// racing on the same new id can both choose insert, and the primary key then
/// rejects the second.
///
/// # Errors
/// Same as [`insert`] and [`update`].
pub async fn insert_or_update<E>(
    table: &str,
    record: &Record,
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let id = match record.id() {
        None | Some(FieldValue::Bind(RowValues::Null)) => None,
        Some(id) => Some(id),
    };
    let Some(id) = id else {
        let mut fresh = record.clone();
        fresh.remove(ID_COLUMN);
        return insert(table, &fresh, conn).await;
    };

    let lookup = build_id_lookup(table, id, conn.placeholder_style())?;
    let existing = run(conn, lookup).await?;
    if existing.is_empty() {
        debug!(table, "no row for id, inserting");
        insert(table, record, conn).await
    } else {
        debug!(table, "row exists, updating");
        update(table, record, conn).await
    }
}

/// Read rows shaped by `options`.
///
/// # Errors
/// [`CatalogDbError::Validation`] for invalid names, `limit = 0` or a join without
/// `on`; store errors otherwise.
pub async fn select<E>(
    table: &str,
    options: &SelectOptions,
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let stmt = build_select(table, options, conn.placeholder_style())?;
    run(conn, stmt).await
}

/// Delete the rows matching `filter` and return them.
///
/// # Errors
/// [`CatalogDbError::Validation`] for an invalid table or a blank literal.
pub async fn exclude<E>(
    table: &str,
    filter: &DeleteFilter,
    conn: &mut E,
) -> Result<ResultSet, CatalogDbError>
where
    E: StatementExecutor + Send,
{
    let stmt = build_exclude(table, filter, conn.placeholder_style())?;
    run(conn, stmt).await
}
