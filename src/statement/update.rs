use super::{Binder, Statement};
use crate::error::CatalogDbError;
use crate::ident::{check_column, check_write_table};
use crate::record::{ID_COLUMN, Record};
use crate::translation::PlaceholderStyle;

/// `UPDATE table SET col = .., .. WHERE id = .. RETURNING *`.
///
/// The record's `id` selects the row; every other column is assigned.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] if `id` is missing, there is nothing
/// besides `id` to assign, or a name is invalid.
pub fn build_update(
    table: &str,
    record: &Record,
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    check_write_table(table)?;
    let Some(id) = record.id() else {
        return Err(CatalogDbError::validation(format!(
            "update {table}: record has no `{ID_COLUMN}`"
        )));
    };

    let mut binder = Binder::new(style);
    let mut assignments = Vec::with_capacity(record.len());
    for (column, value) in record.iter().filter(|(column, _)| *column != ID_COLUMN) {
        check_column(column)?;
        assignments.push(format!("{column} = {}", binder.field(value)));
    }
    if assignments.is_empty() {
        return Err(CatalogDbError::validation(format!(
            "update {table}: no columns to set besides `{ID_COLUMN}`"
        )));
    }

    let id = binder.field(id);
    let sql = format!(
        "UPDATE {table} SET {} WHERE {ID_COLUMN} = {id} RETURNING *",
        assignments.join(", ")
    );
    Ok(binder.finish(sql))
}
