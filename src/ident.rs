//! Identifier checks applied before any name is spliced into statement text.
//!
//! Values never go through here; they are bound. Names cannot be bound, so they
//! must look like plain SQL identifiers:
//!
//! - column: `name`
//! - table: `name` or `schema.name`, optionally aliased as `users u` / `users AS u`
//! - write target: `name` or `schema.name`, never aliased

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CatalogDbError;

static COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

static TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?",
        r"(\s+((?i:as)\s+)?[A-Za-z_][A-Za-z0-9_]*)?$",
    ))
    .expect("static regex")
});

static WRITE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("static regex")
});

/// Validate a column (or alias) name.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] if `name` is not a plain identifier.
pub fn check_column(name: &str) -> Result<(), CatalogDbError> {
    if COLUMN.is_match(name) {
        Ok(())
    } else {
        Err(CatalogDbError::validation(format!(
            "invalid column name {name:?}"
        )))
    }
}

/// Validate a table reference, allowing a schema prefix and an alias.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] if `table` is not a table reference.
pub fn check_table(table: &str) -> Result<(), CatalogDbError> {
    if TABLE.is_match(table.trim()) {
        Ok(())
    } else {
        Err(CatalogDbError::validation(format!(
            "invalid table reference {table:?}"
        )))
    }
}

/// Validate the target of an insert, update or delete.
///
/// `INSERT INTO users u` is not valid SQL, so unlike [`check_table`] no alias is
/// accepted here.
///
/// # Errors
/// Returns [`CatalogDbError::Validation`] if `table` is not a bare table name.
pub fn check_write_table(table: &str) -> Result<(), CatalogDbError> {
    if WRITE_TABLE.is_match(table.trim()) {
        Ok(())
    } else {
        Err(CatalogDbError::validation(format!(
            "invalid write target {table:?}: expected `name` or `schema.name` without an alias"
        )))
    }
}
