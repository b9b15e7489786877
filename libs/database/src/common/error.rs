/// Unified error type for backing-store operations
///
/// Every store implementation reports failures through this type so callers can
/// treat "the store is unavailable" uniformly, whatever the transport.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Redis-specific errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// The store rejected or could not complete the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
