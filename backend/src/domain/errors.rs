//! Error taxonomy for field service operations.
//!
//! Every failure is local to one request. Storage failures keep their
//! `anyhow` context; the REST layer decides the status code per variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldServiceError {
    #[error("Publisher not found: {0}")]
    PublisherNotFound(String),

    #[error("Daily report not found: {0}")]
    RecordNotFound(String),

    #[error("Daily report {record_id} does not belong to publisher {publisher_id}")]
    NotOwner {
        publisher_id: String,
        record_id: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// The daily write is already committed when this is returned
    #[error("Monthly recalculation failed for publisher {publisher_id}, month {month}; the daily report was saved")]
    Aggregation {
        publisher_id: String,
        month: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
