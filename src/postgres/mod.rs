//! PostgreSQL backend: bb8 pool of `tokio-postgres` clients.

pub mod config;
pub mod params;
pub mod query;

pub use config::{PgManager, PgPooledConnection};
pub use params::Params;
pub use query::{dml, execute_batch, select};
