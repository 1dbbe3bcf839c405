//! # REST API for Field Service Reports
//!
//! Congregation-wide month reports and per-publisher service year reports.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use super::error_response;
use super::mappers::field_service_mapper::FieldServiceMapper;
use crate::domain::commands::reports::{CongregationMonthQuery, ServiceYearQuery};
use crate::AppState;

/// Create a router for report APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/field-service/months/:month", get(congregation_month_report))
        .route(
            "/publishers/:publisher_id/field-service/service-years/:service_year",
            get(service_year_report),
        )
}

/// Every publisher's monthly record for one month
pub async fn congregation_month_report(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/field-service/months/{}", month);

    match state
        .report_service
        .congregation_month_report(CongregationMonthQuery { month })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_congregation_response(result))).into_response(),
        Err(e) => {
            error!("Failed to build congregation report: {}", e);
            error_response(e)
        }
    }
}

/// One publisher's months for a service year
pub async fn service_year_report(
    State(state): State<AppState>,
    Path((publisher_id, service_year)): Path<(String, i32)>,
) -> impl IntoResponse {
    info!(
        "GET /api/publishers/{}/field-service/service-years/{}",
        publisher_id, service_year
    );

    let query = ServiceYearQuery {
        publisher_id,
        service_year,
    };

    match state.report_service.service_year_report(query).await {
        Ok(result) => (StatusCode::OK, Json(FieldServiceMapper::to_service_year_response(result))).into_response(),
        Err(e) => {
            error!("Failed to build service year report: {}", e);
            error_response(e)
        }
    }
}
