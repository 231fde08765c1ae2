//! Backend trait for delivery record storage.
//!
//! This module defines the abstraction layer for the append-only log of
//! delivered emails, allowing different storage implementations (memory,
//! PostgreSQL) to be used interchangeably.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend cannot be reached
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// Store backend setting cannot be satisfied
    #[error("Record store misconfigured: {0}")]
    Misconfigured(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Identifier assigned by the store. Monotonically increasing per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields supplied by the caller when recording a delivered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeliveryRecord {
    pub to_email: String,
    pub subject: String,
    pub content: String,
}

/// One successfully delivered email. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRecord {
    pub id: RecordId,
    pub to_email: String,
    pub subject: String,
    pub content: String,
    /// Assigned by the store at persistence time
    pub sent_at: DateTime<Utc>,
}

/// Append-only store of delivery records.
///
/// Implementations own identity assignment and the creation timestamp.
/// Records are never updated or deleted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend type identifier
    fn backend_type(&self) -> &'static str;

    /// Persist a record, returning it with its assigned id and timestamp.
    async fn persist(&self, record: NewDeliveryRecord) -> Result<DeliveryRecord, StoreError>;

    /// Look up a record by id.
    async fn get(&self, id: RecordId) -> Result<Option<DeliveryRecord>, StoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
        assert_eq!(RecordId::new(42).to_string(), "42");
        assert_eq!(RecordId::new(7).as_i64(), 7);
    }

    #[test]
    fn test_record_serializes_id_transparently() {
        let record = DeliveryRecord {
            id: RecordId::new(3),
            to_email: "a@b.com".to_string(),
            subject: "Subject".to_string(),
            content: "Body".to_string(),
            sent_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["to_email"], "a@b.com");
    }
}
