//! PostgreSQL record store.
//!
//! Table structure (see `migrations/`):
//! - `email_records` - one row per delivered email, id from `BIGSERIAL`,
//!   `sent_at` defaulted by the database at insert time

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::backend::{DeliveryRecord, NewDeliveryRecord, RecordId, RecordStore, StoreError};

type RecordRow = (i64, String, String, String, DateTime<Utc>);

pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    fn backend_type(&self) -> &'static str {
        "postgres"
    }

    #[tracing::instrument(name = "record.persist", skip_all, level = "debug")]
    async fn persist(&self, record: NewDeliveryRecord) -> Result<DeliveryRecord, StoreError> {
        let (id, sent_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO email_records (to_email, subject, content)
            VALUES ($1, $2, $3)
            RETURNING id, sent_at
            "#,
        )
        .bind(&record.to_email)
        .bind(&record.subject)
        .bind(&record.content)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(record_id = id, "Delivery record inserted");

        Ok(DeliveryRecord {
            id: RecordId::new(id),
            to_email: record.to_email,
            subject: record.subject,
            content: record.content,
            sent_at,
        })
    }

    async fn get(&self, id: RecordId) -> Result<Option<DeliveryRecord>, StoreError> {
        let row: Option<RecordRow> = sqlx::query_as(
            r#"
            SELECT id, to_email, subject, content, sent_at
            FROM email_records
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, to_email, subject, content, sent_at)| DeliveryRecord {
            id: RecordId::new(id),
            to_email,
            subject,
            content,
            sent_at,
        }))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresRecordStore>();
    }
}
