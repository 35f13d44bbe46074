use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogDbError {
    /// Rejected before any statement reached the store.
    #[error("Validation error: {0}")]
    Validation(String),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] bb8::RunError<tokio_postgres::Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),

    #[error("Other database error: {0}")]
    Other(String),
}

impl CatalogDbError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors raised by input checks, before the store was contacted.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for errors reported by the store, its driver, or its pool.
    #[must_use]
    pub fn is_store(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Self::PostgresError(_) | Self::PoolErrorPostgres(_) => true,
            #[cfg(feature = "sqlite")]
            Self::SqliteError(_) => true,
            Self::ConnectionError(_) | Self::ExecutionError(_) | Self::ParameterError(_) => true,
            _ => false,
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<bb8::RunError<CatalogDbError>> for CatalogDbError {
    fn from(err: bb8::RunError<CatalogDbError>) -> Self {
        match err {
            bb8::RunError::User(inner) => inner,
            bb8::RunError::TimedOut => {
                CatalogDbError::ConnectionError("SQLite pool checkout timed out".to_string())
            }
        }
    }
}
