//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. Any store
//! that can upsert by composite key, find by key, and delete by key satisfies
//! the field service core.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{DailyRecord, MonthlyRecord, Publisher, ServiceMonth};

/// Trait defining the interface for publisher storage operations
#[async_trait]
pub trait PublisherStorage: Send + Sync {
    /// Store a new publisher
    async fn store_publisher(&self, publisher: &Publisher) -> Result<()>;

    /// Retrieve a specific publisher by ID
    async fn get_publisher(&self, publisher_id: &str) -> Result<Option<Publisher>>;

    /// List all publishers ordered by name
    async fn list_publishers(&self) -> Result<Vec<Publisher>>;
}

/// Trait defining the interface for daily field service record storage
#[async_trait]
pub trait DailyRecordStorage: Send + Sync {
    /// Insert the record, or replace the existing record for the same
    /// (publisher, date). A replaced record keeps its id and `created_at`.
    /// Returns the record as stored.
    async fn upsert_daily_record(&self, record: &DailyRecord) -> Result<DailyRecord>;

    /// Retrieve a record by ID regardless of owner
    async fn get_daily_record(&self, record_id: &str) -> Result<Option<DailyRecord>>;

    /// Retrieve a record by ID only if it belongs to `publisher_id`
    async fn get_daily_record_for_publisher(
        &self,
        publisher_id: &str,
        record_id: &str,
    ) -> Result<Option<DailyRecord>>;

    /// List a publisher's records for one month, ordered by date ascending
    async fn list_daily_records(&self, publisher_id: &str, month: &ServiceMonth) -> Result<Vec<DailyRecord>>;

    /// Delete a publisher's record.
    /// Returns true if the record was found and deleted, false otherwise
    async fn delete_daily_record(&self, publisher_id: &str, record_id: &str) -> Result<bool>;
}

/// Trait defining the interface for derived monthly record storage
#[async_trait]
pub trait MonthlyRecordStorage: Send + Sync {
    /// Insert or replace the record for (publisher, month)
    async fn upsert_monthly_record(&self, record: &MonthlyRecord) -> Result<()>;

    /// Retrieve the record for (publisher, month)
    async fn get_monthly_record(&self, publisher_id: &str, month: &ServiceMonth) -> Result<Option<MonthlyRecord>>;

    /// Delete the record for (publisher, month).
    /// Returns true if a record was deleted
    async fn delete_monthly_record(&self, publisher_id: &str, month: &ServiceMonth) -> Result<bool>;

    /// All publishers' records for one month, ordered by publisher name
    async fn list_monthly_records_for_month(&self, month: &ServiceMonth) -> Result<Vec<MonthlyRecord>>;

    /// A publisher's records between two months inclusive, in month order
    async fn list_monthly_records_in_range(
        &self,
        publisher_id: &str,
        from: &ServiceMonth,
        to: &ServiceMonth,
    ) -> Result<Vec<MonthlyRecord>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides factory
/// methods for creating repositories, so the domain layer works with any
/// storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type PublisherRepository: PublisherStorage + Clone;
    type DailyRecordRepository: DailyRecordStorage + Clone;
    type MonthlyRecordRepository: MonthlyRecordStorage + Clone;

    fn create_publisher_repository(&self) -> Self::PublisherRepository;

    fn create_daily_record_repository(&self) -> Self::DailyRecordRepository;

    fn create_monthly_record_repository(&self) -> Self::MonthlyRecordRepository;
}
