//! Delivery record persistence.
//!
//! A record is written exactly once per email the provider accepted, after
//! the provider call returned. Failed sends leave no record.

mod backend;
mod factory;
mod memory_backend;
mod postgres_backend;

pub use backend::{DeliveryRecord, NewDeliveryRecord, RecordId, RecordStore, StoreError};
pub use factory::create_record_store;
pub use memory_backend::MemoryRecordStore;
pub use postgres_backend::PostgresRecordStore;
