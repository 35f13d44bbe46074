//! `SQLite` backend: bb8 pool of `rusqlite` connections driven on the blocking pool.

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{
    SharedSqliteConnection, SqliteManager, SqliteOptions, SqliteOptionsBuilder,
    SqlitePooledConnection,
};
pub use connection::{dml, execute_batch, select};
pub use params::Params;
