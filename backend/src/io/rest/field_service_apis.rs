//! # REST API for Daily Field Service Reports
//!
//! Endpoints for a publisher's daily reports and month views. Every write
//! responds with the monthly record as rebuilt in the same request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use tracing::{error, info};

use super::error_response;
use super::mappers::field_service_mapper::FieldServiceMapper;
use crate::domain::commands::field_service::{
    DeleteDailyReportCommand, ListDailyReportsQuery, RecalculateMonthCommand, SummarizeMonthQuery,
};
use crate::AppState;
use shared::{DailyReportListRequest, SubmitDailyReportRequest};

/// Create a router for daily report related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/publishers/:publisher_id/field-service/daily",
            get(list_daily_reports).post(submit_daily_report),
        )
        .route(
            "/publishers/:publisher_id/field-service/daily/:record_id",
            delete(delete_daily_report),
        )
        .route("/publishers/:publisher_id/field-service/months/:month", get(summarize_month))
        .route(
            "/publishers/:publisher_id/field-service/months/:month/recalculate",
            post(recalculate_month),
        )
}

/// Submit or resubmit one day of field service
pub async fn submit_daily_report(
    State(state): State<AppState>,
    Path(publisher_id): Path<String>,
    Json(request): Json<SubmitDailyReportRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/publishers/{}/field-service/daily - request: {:?}",
        publisher_id, request
    );

    let command = FieldServiceMapper::to_submit_command(publisher_id, request);

    match state.daily_report_service.submit_daily_report(command).await {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_submit_response(result))).into_response(),
        Err(e) => {
            error!("Failed to submit daily report: {}", e);
            error_response(e)
        }
    }
}

/// List a publisher's daily reports for `?month=YYYY-MM`
pub async fn list_daily_reports(
    State(state): State<AppState>,
    Path(publisher_id): Path<String>,
    Query(query): Query<DailyReportListRequest>,
) -> impl IntoResponse {
    info!(
        "GET /api/publishers/{}/field-service/daily - query: {:?}",
        publisher_id, query
    );

    let query = ListDailyReportsQuery {
        publisher_id,
        month: query.month,
    };

    match state.daily_report_service.list_daily_reports(query).await {
        Ok(records) => (StatusCode::OK, Json(FieldServiceMapper::to_list_response(records))).into_response(),
        Err(e) => {
            error!("Failed to list daily reports: {}", e);
            error_response(e)
        }
    }
}

/// Delete one of the publisher's daily reports
pub async fn delete_daily_report(
    State(state): State<AppState>,
    Path((publisher_id, record_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/publishers/{}/field-service/daily/{}",
        publisher_id, record_id
    );

    let command = DeleteDailyReportCommand {
        publisher_id,
        record_id,
    };

    match state.daily_report_service.delete_daily_report(command).await {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_delete_response(result))).into_response(),
        Err(e) => {
            error!("Failed to delete daily report: {}", e);
            error_response(e)
        }
    }
}

/// Daily reports, stored monthly record and fresh totals for one month
pub async fn summarize_month(
    State(state): State<AppState>,
    Path((publisher_id, month)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/publishers/{}/field-service/months/{}", publisher_id, month);

    let query = SummarizeMonthQuery { publisher_id, month };

    match state.daily_report_service.summarize_month(query).await {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_summary_response(result))).into_response(),
        Err(e) => {
            error!("Failed to summarize month: {}", e);
            error_response(e)
        }
    }
}

/// Re-run the monthly aggregation for one month
pub async fn recalculate_month(
    State(state): State<AppState>,
    Path((publisher_id, month)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "POST /api/publishers/{}/field-service/months/{}/recalculate",
        publisher_id, month
    );

    let command = RecalculateMonthCommand { publisher_id, month };

    match state.daily_report_service.recalculate_month(command).await {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_recalculate_response(result))).into_response(),
        Err(e) => {
            error!("Failed to recalculate month: {}", e);
            error_response(e)
        }
    }
}
