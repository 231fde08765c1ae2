//! Record store factory

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::postgres::PostgresPool;

use super::backend::{RecordStore, StoreError};
use super::memory_backend::MemoryRecordStore;
use super::postgres_backend::PostgresRecordStore;

/// Create a record store based on configuration.
///
/// Returns the appropriate backend implementation based on the `backend` setting:
/// - `"postgres"` (default): Returns a `PostgresRecordStore`; requires a PostgreSQL pool
/// - `"memory"`: Returns a `MemoryRecordStore`
///
/// Any other value, or `"postgres"` without a pool, is a startup error.
///
/// # Example
///
/// ```rust,ignore
/// let store = create_record_store(&settings.store, Some(&pg_pool))?;
/// ```
pub fn create_record_store(
    settings: &StoreConfig,
    postgres_pool: Option<&PostgresPool>,
) -> Result<Arc<dyn RecordStore>, StoreError> {
    match settings.backend.as_str() {
        "memory" => {
            tracing::warn!(
                backend = "memory",
                "Creating in-memory record store, records are lost on restart"
            );
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        "postgres" => {
            let pool = postgres_pool.ok_or_else(|| {
                StoreError::Misconfigured("postgres backend requires a database pool".to_string())
            })?;
            tracing::info!(
                backend = "postgres",
                database_url = %pool.database_url_masked(),
                "Creating PostgreSQL record store"
            );
            Ok(Arc::new(PostgresRecordStore::new(pool.pool().clone())))
        }
        other => Err(StoreError::Misconfigured(format!(
            "unknown store backend '{other}', expected 'postgres' or 'memory'"
        ))),
    }
}
