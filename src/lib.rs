//! Statement builder and pooled SQLite/PostgreSQL access for the game catalog.
//!
//! The core is a small set of async operations ([`insert`], [`batch_insert`],
//! [`update`], [`insert_or_update`], [`select`], [`exclude`]) that turn a table
//! name plus plain data into one parameterized statement and run it on whatever
//! [`StatementExecutor`] the caller passes in. [`StoreConnection`], checked out
//! of a [`ConfigAndPool`], is the executor for the bundled backends.
//!
//! ```rust,no_run
//! use catalog_db::prelude::*;
//!
//! # async fn demo() -> Result<(), CatalogDbError> {
//! let pool = ConfigAndPool::sqlite_builder("catalog.db".to_string()).build().await?;
//! let mut conn = pool.get_connection().await?;
//!
//! let user = Record::new().with("name", "Ana").with("email", "ana@example.com");
//! let inserted = insert("users", &user, &mut conn).await?;
//! let id = inserted.first().and_then(DbRow::id);
//!
//! let page = select(
//!     "users",
//!     &SelectOptions::new().with_order_by("id").with_limit(10),
//!     &mut conn,
//! )
//! .await?;
//! # let _ = (id, page);
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod error;
pub mod executor;
pub mod ident;
pub mod ops;
pub mod options;
pub mod pool;
pub mod raw_query;
pub mod record;
pub mod results;
pub mod statement;
pub mod translation;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::CatalogDbError;
pub use executor::StatementExecutor;
pub use ops::{batch_insert, exclude, insert, insert_or_update, select, update};
pub use options::{DeleteFilter, Join, JoinKind, SelectColumn, SelectOptions};
pub use pool::{ConfigAndPool, StoreConnection, StorePool};
pub use record::{FieldValue, ID_COLUMN, Record};
pub use results::{DbRow, ResultSet};
pub use statement::Statement;
pub use translation::{PlaceholderStyle, TranslationMode, translate_placeholders};
pub use types::{DatabaseType, RowValues};
