//! Domain model for the monthly summary derived from daily records.

use super::service_month::ServiceMonth;

/// Monthly summary for (publisher, month). Only the aggregator produces these.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    pub publisher_id: String,
    pub month: ServiceMonth,
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_students: i64,
    pub report_days: i64,
    pub comments: String,
}

impl MonthlyRecord {
    pub fn generate_id(publisher_id: &str, month: &ServiceMonth) -> String {
        format!("monthly::{}::{}", publisher_id, month)
    }

    pub fn id(&self) -> String {
        Self::generate_id(&self.publisher_id, &self.month)
    }
}

/// Activity totals over a set of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthTotals {
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_studies: i64,
}
