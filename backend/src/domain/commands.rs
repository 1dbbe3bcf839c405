//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod publisher {
    use crate::domain::models::Publisher;

    /// Input for creating a new publisher.
    #[derive(Debug, Clone)]
    pub struct CreatePublisherCommand {
        pub name: String,
    }

    /// Result of creating a publisher.
    #[derive(Debug, Clone)]
    pub struct CreatePublisherResult {
        pub publisher: Publisher,
        pub success_message: String,
    }
}

pub mod field_service {
    use crate::domain::models::{DailyRecord, MonthTotals, MonthlyRecord};

    /// Input for submitting one day of field service. Resubmitting the same
    /// date replaces that day.
    #[derive(Debug, Clone)]
    pub struct SubmitDailyReportCommand {
        pub publisher_id: String,
        pub date: String,
        pub shared_in_ministry: Option<bool>,
        pub hours: Option<f64>,
        pub placements: Option<i64>,
        pub videos: Option<i64>,
        pub bible_study_ids: Vec<String>,
        pub comments: Option<String>,
    }

    /// Query for a publisher's daily records in one month.
    #[derive(Debug, Clone)]
    pub struct ListDailyReportsQuery {
        pub publisher_id: String,
        pub month: String,
    }

    /// Command for deleting one of the publisher's own daily records.
    #[derive(Debug, Clone)]
    pub struct DeleteDailyReportCommand {
        pub publisher_id: String,
        pub record_id: String,
    }

    /// Query for the detail view of a publisher's month.
    #[derive(Debug, Clone)]
    pub struct SummarizeMonthQuery {
        pub publisher_id: String,
        pub month: String,
    }

    /// Command for re-running the monthly aggregation explicitly.
    #[derive(Debug, Clone)]
    pub struct RecalculateMonthCommand {
        pub publisher_id: String,
        pub month: String,
    }

    /// Result of submitting a daily report.
    #[derive(Debug, Clone)]
    pub struct SubmitDailyReportResult {
        pub daily_record: DailyRecord,
        pub monthly_record: Option<MonthlyRecord>,
        pub success_message: String,
    }

    /// Result of deleting a daily report.
    #[derive(Debug, Clone)]
    pub struct DeleteDailyReportResult {
        pub deleted_id: String,
        pub monthly_record: Option<MonthlyRecord>,
        pub success_message: String,
    }

    /// Daily records, the stored monthly record, and totals recomputed from
    /// the daily records.
    #[derive(Debug, Clone)]
    pub struct MonthSummaryResult {
        pub daily_records: Vec<DailyRecord>,
        pub monthly_record: Option<MonthlyRecord>,
        pub totals: MonthTotals,
    }

    /// Result of an explicit recalculation.
    #[derive(Debug, Clone)]
    pub struct RecalculateMonthResult {
        pub monthly_record: Option<MonthlyRecord>,
        pub success_message: String,
    }
}

pub mod reports {
    use crate::domain::models::{MonthTotals, MonthlyRecord, ServiceMonth};

    /// Query for every publisher's monthly record in one month.
    #[derive(Debug, Clone)]
    pub struct CongregationMonthQuery {
        pub month: String,
    }

    /// Query for one publisher's service year.
    #[derive(Debug, Clone)]
    pub struct ServiceYearQuery {
        pub publisher_id: String,
        pub service_year: i32,
    }

    #[derive(Debug, Clone)]
    pub struct CongregationMonthResult {
        pub month: ServiceMonth,
        pub monthly_records: Vec<MonthlyRecord>,
        pub totals: MonthTotals,
    }

    #[derive(Debug, Clone)]
    pub struct ServiceYearResult {
        pub service_year: i32,
        pub monthly_records: Vec<MonthlyRecord>,
        pub totals: MonthTotals,
        pub average_bible_students: f64,
    }
}
