use super::{Binder, Statement};
use crate::error::CatalogDbError;
use crate::ident::{check_column, check_write_table};
use crate::record::Record;
use crate::translation::PlaceholderStyle;

/// `INSERT INTO table (cols) VALUES (..) RETURNING *` for one record.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] for an empty record or an invalid name.
pub fn build_insert(
    table: &str,
    record: &Record,
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    build_batch_insert(table, std::slice::from_ref(record), style)
}

/// One multi-row insert; the first record's columns define the column list.
///
/// Later records may list their columns in any order but must carry exactly the
/// same set.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] for an empty batch, an empty first
/// record, a record whose columns differ from the first, or an invalid name.
pub fn build_batch_insert(
    table: &str,
    records: &[Record],
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    check_write_table(table)?;
    let Some(first) = records.first() else {
        return Err(CatalogDbError::validation(format!(
            "insert into {table}: no records given"
        )));
    };
    if first.is_empty() {
        return Err(CatalogDbError::validation(format!(
            "insert into {table}: record has no columns"
        )));
    }
    let columns: Vec<&str> = first.columns().collect();
    for column in &columns {
        check_column(column)?;
    }

    let mut binder = Binder::new(style);
    let mut rows = Vec::with_capacity(records.len());
    for (n, record) in records.iter().enumerate() {
        if record.len() != columns.len() {
            return Err(shape_error(table, n, &columns, record));
        }
        let mut values = Vec::with_capacity(columns.len());
        for column in &columns {
            let value = record
                .get(column)
                .ok_or_else(|| shape_error(table, n, &columns, record))?;
            values.push(binder.field(value));
        }
        rows.push(format!("({})", values.join(", ")));
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES {} RETURNING *",
        columns.join(", "),
        rows.join(", ")
    );
    Ok(binder.finish(sql))
}

fn shape_error(table: &str, n: usize, expected: &[&str], record: &Record) -> CatalogDbError {
    CatalogDbError::validation(format!(
        "insert into {table}: record {n} has columns [{}], expected [{}]",
        record.columns().collect::<Vec<_>>().join(", "),
        expected.join(", ")
    ))
}
