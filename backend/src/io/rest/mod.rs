//! # REST API Interface Layer
//!
//! HTTP endpoints for the field service backend. Handlers translate shared
//! DTOs into domain commands, call the services, and map domain errors to
//! status codes. No business logic lives here.

pub mod field_service_apis;
pub mod mappers;
pub mod publisher_apis;
pub mod report_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::FieldServiceError;

/// HTTP status for a domain error
pub fn status_for(error: &FieldServiceError) -> StatusCode {
    match error {
        FieldServiceError::PublisherNotFound(_) | FieldServiceError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        FieldServiceError::NotOwner { .. } => StatusCode::FORBIDDEN,
        FieldServiceError::InvalidInput(_) | FieldServiceError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
        FieldServiceError::Aggregation { .. } | FieldServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into a plain-text error response
pub fn error_response(error: FieldServiceError) -> Response {
    (status_for(&error), error.to_string()).into_response()
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
