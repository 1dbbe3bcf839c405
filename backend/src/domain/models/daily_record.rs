//! Domain model for one publisher's field service on one calendar day.
use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::service_month::ServiceMonth;

/// Validated activity for a single day, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_study_ids: BTreeSet<String>,
    pub comments: Option<String>,
}

/// A stored daily record, unique per (publisher, date)
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub id: String,
    pub publisher_id: String,
    pub date: NaiveDate,
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_study_ids: BTreeSet<String>,
    pub comments: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl DailyRecord {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Build a fresh record for `publisher_id`. When the day already exists the
    /// storage layer keeps the original id and `created_at`.
    pub fn from_activity(publisher_id: &str, activity: DailyActivity, now_rfc3339: &str) -> Self {
        Self {
            id: Self::generate_id(),
            publisher_id: publisher_id.to_string(),
            date: activity.date,
            shared_in_ministry: activity.shared_in_ministry,
            hours: activity.hours,
            placements: activity.placements,
            videos: activity.videos,
            bible_study_ids: activity.bible_study_ids,
            comments: activity.comments,
            created_at: now_rfc3339.to_string(),
            updated_at: now_rfc3339.to_string(),
        }
    }

    /// Month bucket of this record; always derived from `date`
    pub fn month(&self) -> ServiceMonth {
        ServiceMonth::from_date(self.date)
    }
}
