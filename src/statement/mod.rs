//! Statement assembly.
//!
//! Every `build_*` function is a pure translation from a table name plus a
//! record, batch, option set or filter into a [`Statement`]: SQL text in the
//! target placeholder style and the values to bind, in placeholder order.
//!
//! - Names (tables, columns, join targets, aliases) are validated, never bound.
//! - [`FieldValue::Bind`] values become placeholders; [`FieldValue::Raw`] values,
//!   `on`/`where`/`order_by` clauses and [`DeleteFilter::Literal`] predicates are
//!   inlined verbatim.
//! - Writes end in `RETURNING *` so the caller gets the affected rows back.
//!
//! [`DeleteFilter::Literal`]: crate::options::DeleteFilter::Literal

mod delete;
mod insert;
mod select;
mod update;

pub use delete::build_exclude;
pub use insert::{build_batch_insert, build_insert};
pub use select::{build_id_lookup, build_select};
pub use update::build_update;

use crate::record::FieldValue;
use crate::translation::PlaceholderStyle;
use crate::types::RowValues;

/// SQL text plus its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<RowValues>,
}

/// Hands out placeholders while collecting the values they stand for.
struct Binder {
    style: PlaceholderStyle,
    params: Vec<RowValues>,
}

impl Binder {
    fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            params: Vec::new(),
        }
    }

    fn bind(&mut self, value: &RowValues) -> String {
        self.params.push(value.clone());
        self.style.placeholder(self.params.len())
    }

    /// Placeholder for bound values, the expression itself for raw ones.
    fn field(&mut self, value: &FieldValue) -> String {
        match value {
            FieldValue::Bind(value) => self.bind(value),
            FieldValue::Raw(expr) => expr.clone(),
        }
    }

    fn finish(self, sql: String) -> Statement {
        Statement {
            sql,
            params: self.params,
        }
    }
}
