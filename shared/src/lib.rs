use serde::{Deserialize, Serialize};

/// Represents a publisher (a congregation member who reports field service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    pub created_at: String, // RFC 3339 timestamp
}

/// Request for creating a new publisher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePublisherRequest {
    pub name: String,
}

/// Response after creating a publisher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublisherResponse {
    pub publisher: Publisher,
    pub success_message: String,
}

/// Response containing a list of publishers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublisherListResponse {
    pub publishers: Vec<Publisher>,
}

/// One publisher's field service activity for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFieldServiceRecord {
    pub id: String,
    pub publisher_id: String,
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
    /// Year-month of `date` (YYYY-MM), always derived
    pub month: String,
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    /// Bible studies visited that day, sorted and without duplicates
    pub bible_study_ids: Vec<String>,
    pub comments: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Monthly summary derived from a publisher's daily records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFieldServiceRecord {
    pub id: String,
    pub publisher_id: String,
    /// Year-month (YYYY-MM)
    pub month: String,
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    /// Count of distinct Bible study ids across the month
    pub bible_students: i64,
    /// Number of daily records the summary was built from
    pub report_days: i64,
    /// Generated description of how the summary was built
    pub comments: String,
}

/// Totals recomputed from daily records on every read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldServiceTotals {
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_studies: i64,
}

/// Request for submitting (or resubmitting) one day of field service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitDailyReportRequest {
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub shared_in_ministry: Option<bool>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub placements: Option<i64>,
    #[serde(default)]
    pub videos: Option<i64>,
    #[serde(default)]
    pub bible_study_ids: Vec<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Response after submitting a daily report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitDailyReportResponse {
    pub daily_record: DailyFieldServiceRecord,
    pub monthly_record: Option<MonthlyFieldServiceRecord>,
    pub success_message: String,
}

/// Query for listing a publisher's daily records in one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReportListRequest {
    /// Year-month (YYYY-MM)
    pub month: String,
}

/// Response containing a month of daily records, ordered by date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReportListResponse {
    pub daily_records: Vec<DailyFieldServiceRecord>,
}

/// Response after deleting a daily record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteDailyReportResponse {
    pub deleted_id: String,
    /// Monthly record after recalculation; None when the month became empty
    pub monthly_record: Option<MonthlyFieldServiceRecord>,
    pub success_message: String,
}

/// Detail view of one publisher's month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSummaryResponse {
    pub daily_records: Vec<DailyFieldServiceRecord>,
    pub monthly_record: Option<MonthlyFieldServiceRecord>,
    pub totals: FieldServiceTotals,
}

/// Response after an explicit monthly recalculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecalculateMonthResponse {
    pub monthly_record: Option<MonthlyFieldServiceRecord>,
    pub success_message: String,
}

/// Monthly records of every publisher for one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CongregationMonthResponse {
    pub month: String,
    pub monthly_records: Vec<MonthlyFieldServiceRecord>,
    pub totals: FieldServiceTotals,
}

/// A publisher's monthly records across one service year (September - August)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceYearResponse {
    pub service_year: i32,
    pub monthly_records: Vec<MonthlyFieldServiceRecord>,
    pub totals: FieldServiceTotals,
    pub average_bible_students: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_defaults_missing_fields() {
        let request: SubmitDailyReportRequest =
            serde_json::from_str(r#"{"date":"2024-03-01"}"#).unwrap();

        assert_eq!(request.date, "2024-03-01");
        assert_eq!(request.shared_in_ministry, None);
        assert_eq!(request.hours, None);
        assert_eq!(request.placements, None);
        assert_eq!(request.videos, None);
        assert!(request.bible_study_ids.is_empty());
        assert_eq!(request.comments, None);
    }

    #[test]
    fn test_month_summary_serializes_missing_monthly_record_as_null() {
        let response = MonthSummaryResponse {
            daily_records: Vec::new(),
            monthly_record: None,
            totals: FieldServiceTotals::default(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["monthly_record"].is_null());
        assert_eq!(json["totals"]["bible_studies"], 0);
    }
}
