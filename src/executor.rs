//! The seam between the statement builder and a store.

use crate::error::CatalogDbError;
use crate::results::ResultSet;
use crate::translation::PlaceholderStyle;
use crate::types::RowValues;

/// Anything that can run one parameterized statement and hand back its rows.
///
/// [`StoreConnection`](crate::pool::StoreConnection) implements it for the pooled
/// backends; tests and callers may inject their own.
pub trait StatementExecutor {
    /// Placeholder syntax the statement builder must emit for this store.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Run `sql` with `params` bound positionally and return every row it yields.
    ///
    /// The SQL already uses [`Self::placeholder_style`]; implementations must not
    /// rewrite it.
    #[allow(clippy::manual_async_fn)]
    fn fetch(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> impl std::future::Future<Output = Result<ResultSet, CatalogDbError>> + Send;
}
