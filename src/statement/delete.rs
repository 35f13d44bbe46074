use super::{Binder, Statement};
use crate::error::CatalogDbError;
use crate::ident::check_write_table;
use crate::options::DeleteFilter;
use crate::record::ID_COLUMN;
use crate::translation::PlaceholderStyle;

/// `DELETE FROM table [WHERE ..] RETURNING *`.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] for an invalid table or a blank literal.
pub fn build_exclude(
    table: &str,
    filter: &DeleteFilter,
    style: PlaceholderStyle,
) -> Result<Statement, CatalogDbError> {
    check_write_table(table)?;
    let mut binder = Binder::new(style);
    let predicate = match filter {
        DeleteFilter::All => None,
        DeleteFilter::Literal(literal) if literal.trim().is_empty() => {
            return Err(CatalogDbError::validation(format!(
                "delete from {table}: literal condition is blank"
            )));
        }
        DeleteFilter::Literal(literal) => Some(literal.clone()),
        DeleteFilter::Id(id) => Some(format!("{ID_COLUMN} = {}", binder.bind(id))),
    };

    let sql = match predicate {
        Some(predicate) => format!("DELETE FROM {table} WHERE {predicate} RETURNING *"),
        None => format!("DELETE FROM {table} RETURNING *"),
    };
    Ok(binder.finish(sql))
}
