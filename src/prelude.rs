//! Convenient imports for common functionality.

pub use crate::error::CatalogDbError;
pub use crate::executor::StatementExecutor;
pub use crate::ops::{batch_insert, exclude, insert, insert_or_update, select, update};
pub use crate::options::{DeleteFilter, Join, JoinKind, SelectColumn, SelectOptions};
pub use crate::pool::{ConfigAndPool, StoreConnection, StorePool};
pub use crate::raw_query::RawQuery;
pub use crate::record::{FieldValue, Record};
pub use crate::results::{DbRow, ResultSet};
pub use crate::statement::{
    Statement, build_batch_insert, build_exclude, build_insert, build_select, build_update,
};
pub use crate::translation::{PlaceholderStyle, TranslationMode, translate_placeholders};
pub use crate::types::{DatabaseType, RowValues};

#[cfg(feature = "postgres")]
pub use crate::postgres::PgManager;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteManager, SqliteOptions, SqliteOptionsBuilder};
