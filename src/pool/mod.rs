pub mod connection;
pub mod types;

pub use connection::StoreConnection;
pub use types::StorePool;

use tracing::trace;

use crate::error::CatalogDbError;
use crate::types::DatabaseType;

/// Configuration and connection pool for a database.
///
/// Cheap to clone; clones share the same pool.
#[derive(Clone, Debug)]
pub struct ConfigAndPool {
    /// The connection pool
    pub pool: StorePool,
    /// The database type
    pub db_type: DatabaseType,
    /// Whether raw passthrough SQL gets its placeholders translated by default.
    pub translate_placeholders: bool,
}

impl ConfigAndPool {
    /// Check out a connection from the pool.
    ///
    /// # Errors
    /// Returns the pool's error if no connection can be obtained.
    pub async fn get_connection(&self) -> Result<StoreConnection, CatalogDbError> {
        trace!(db_type = ?self.db_type, "checking out connection");
        StorePool::get_connection(&self.pool, self.translate_placeholders).await
    }
}
