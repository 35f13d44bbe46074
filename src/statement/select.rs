use super::{Binder, Statement};
use crate::error::CatalogDbError;
use crate::ident::{check_column, check_table, check_write_table};
use crate::options::{Join, JoinKind, SelectColumn, SelectOptions};
use crate::record::{FieldValue, ID_COLUMN};
use crate::translation::PlaceholderStyle;

/// `SELECT <list|*> FROM table <joins> WHERE <where|1=1> [ORDER BY ..] [LIMIT n] [OFFSET m]`.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] for an invalid name, a non-cross join
/// without `on`, or `limit = 0`.
pub fn build_select(
    table: &str,
    options: &SelectOptions,
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    check_table(table)?;

    let list = if options.columns.is_empty() {
        "*".to_string()
    } else {
        options
            .columns
            .iter()
            .map(render_column)
            .collect::<Result<Vec<_>, _>>()?
            .join(", ")
    };

    let mut sql = format!("SELECT {list} FROM {table}");
    for join in &options.joins {
        sql.push(' ');
        sql.push_str(&render_join(join)?);
    }

    let predicate = options
        .where_clause
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .unwrap_or("1=1");
    sql.push_str(" WHERE ");
    sql.push_str(predicate);

    if let Some(order_by) = options.order_by.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }

    match (options.limit, options.offset) {
        (Some(0), _) => {
            return Err(CatalogDbError::validation(format!(
                "select from {table}: limit must be positive"
            )));
        }
        (Some(limit), offset) => {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }
        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded there.
        (None, Some(offset)) => match style {
            PlaceholderStyle::Sqlite => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            PlaceholderStyle::Postgres => sql.push_str(&format!(" OFFSET {offset}")),
        },
        (None, None) => {}
    }

    Ok(Binder::new(style).finish(sql))
}

/// Existence check used by upsert: `SELECT id FROM table WHERE id = .. LIMIT 1`.
///
/// The table is the upsert's write target, so it takes no alias.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] for an invalid table.
pub fn build_id_lookup(
    table: &str,
    id: &FieldValue,
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    check_write_table(table)?;
    let mut binder = Binder::new(style);
    let id = binder.field(id);
    let sql = format!("SELECT {ID_COLUMN} FROM {table} WHERE {ID_COLUMN} = {id} LIMIT 1");
    Ok(binder.finish(sql))
}

fn render_column(column: &SelectColumn) -> Result<String, CatalogDbError> {
    let mut out = String::new();
    if let Some(table) = &column.table {
        check_column(table)?;
        out.push_str(table);
        out.push('.');
    }
    if column.column != "*" {
        check_column(&column.column)?;
    }
    out.push_str(&column.column);
    if let Some(alias) = &column.alias {
        check_column(alias)?;
        out.push_str(" AS ");
        out.push_str(alias);
    }
    Ok(out)
}

fn render_join(join: &Join) -> Result<String, CatalogDbError> {
    check_table(&join.target)?;
    let on = join.on.as_deref().map(str::trim).filter(|on| !on.is_empty());
    match (join.kind, on) {
        (JoinKind::Cross, None) => Ok(format!("{} {}", join.kind.as_sql(), join.target)),
        (JoinKind::Cross, Some(_)) => Err(CatalogDbError::validation(format!(
            "join {}: CROSS JOIN takes no ON clause",
            join.target
        ))),
        (kind, Some(on)) => Ok(format!("{} {} ON {on}", kind.as_sql(), join.target)),
        (_, None) => Err(CatalogDbError::validation(format!(
            "join {}: missing ON clause",
            join.target
        ))),
    }
}
