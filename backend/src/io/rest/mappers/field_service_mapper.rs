use shared::{
    CongregationMonthResponse, DailyFieldServiceRecord, DailyReportListResponse, DeleteDailyReportResponse,
    FieldServiceTotals, MonthSummaryResponse, MonthlyFieldServiceRecord, RecalculateMonthResponse,
    ServiceYearResponse, SubmitDailyReportRequest, SubmitDailyReportResponse,
};

use crate::domain::commands::field_service::{
    DeleteDailyReportResult, MonthSummaryResult, RecalculateMonthResult, SubmitDailyReportCommand,
    SubmitDailyReportResult,
};
use crate::domain::commands::reports::{CongregationMonthResult, ServiceYearResult};
use crate::domain::models::{DailyRecord, MonthTotals, MonthlyRecord};

pub struct FieldServiceMapper;

impl FieldServiceMapper {
    /// Convert a submit request DTO into the domain command for `publisher_id`
    pub fn to_submit_command(publisher_id: String, request: SubmitDailyReportRequest) -> SubmitDailyReportCommand {
        SubmitDailyReportCommand {
            publisher_id,
            date: request.date,
            shared_in_ministry: request.shared_in_ministry,
            hours: request.hours,
            placements: request.placements,
            videos: request.videos,
            bible_study_ids: request.bible_study_ids,
            comments: request.comments,
        }
    }

    /// Convert domain DailyRecord to shared DTO
    pub fn daily_to_dto(domain: DailyRecord) -> DailyFieldServiceRecord {
        let month = domain.month().to_string();
        DailyFieldServiceRecord {
            id: domain.id,
            publisher_id: domain.publisher_id,
            date: domain.date.format("%Y-%m-%d").to_string(),
            month,
            shared_in_ministry: domain.shared_in_ministry,
            hours: domain.hours,
            placements: domain.placements,
            videos: domain.videos,
            bible_study_ids: domain.bible_study_ids.into_iter().collect(),
            comments: domain.comments,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    /// Convert domain MonthlyRecord to shared DTO
    pub fn monthly_to_dto(domain: MonthlyRecord) -> MonthlyFieldServiceRecord {
        MonthlyFieldServiceRecord {
            id: domain.id(),
            publisher_id: domain.publisher_id,
            month: domain.month.to_string(),
            shared_in_ministry: domain.shared_in_ministry,
            hours: domain.hours,
            placements: domain.placements,
            videos: domain.videos,
            bible_students: domain.bible_students,
            report_days: domain.report_days,
            comments: domain.comments,
        }
    }

    pub fn totals_to_dto(domain: MonthTotals) -> FieldServiceTotals {
        FieldServiceTotals {
            hours: domain.hours,
            placements: domain.placements,
            videos: domain.videos,
            bible_studies: domain.bible_studies,
        }
    }

    pub fn to_submit_response(result: SubmitDailyReportResult) -> SubmitDailyReportResponse {
        SubmitDailyReportResponse {
            daily_record: Self::daily_to_dto(result.daily_record),
            monthly_record: result.monthly_record.map(Self::monthly_to_dto),
            success_message: result.success_message,
        }
    }

    pub fn to_list_response(records: Vec<DailyRecord>) -> DailyReportListResponse {
        DailyReportListResponse {
            daily_records: records.into_iter().map(Self::daily_to_dto).collect(),
        }
    }

    pub fn to_delete_response(result: DeleteDailyReportResult) -> DeleteDailyReportResponse {
        DeleteDailyReportResponse {
            deleted_id: result.deleted_id,
            monthly_record: result.monthly_record.map(Self::monthly_to_dto),
            success_message: result.success_message,
        }
    }

    pub fn to_summary_response(result: MonthSummaryResult) -> MonthSummaryResponse {
        MonthSummaryResponse {
            daily_records: result.daily_records.into_iter().map(Self::daily_to_dto).collect(),
            monthly_record: result.monthly_record.map(Self::monthly_to_dto),
            totals: Self::totals_to_dto(result.totals),
        }
    }

    pub fn to_recalculate_response(result: RecalculateMonthResult) -> RecalculateMonthResponse {
        RecalculateMonthResponse {
            monthly_record: result.monthly_record.map(Self::monthly_to_dto),
            success_message: result.success_message,
        }
    }

    pub fn to_congregation_response(result: CongregationMonthResult) -> CongregationMonthResponse {
        CongregationMonthResponse {
            month: result.month.to_string(),
            monthly_records: result.monthly_records.into_iter().map(Self::monthly_to_dto).collect(),
            totals: Self::totals_to_dto(result.totals),
        }
    }

    pub fn to_service_year_response(result: ServiceYearResult) -> ServiceYearResponse {
        ServiceYearResponse {
            service_year: result.service_year,
            monthly_records: result.monthly_records.into_iter().map(Self::monthly_to_dto).collect(),
            totals: Self::totals_to_dto(result.totals),
            average_bible_students: result.average_bible_students,
        }
    }
}
