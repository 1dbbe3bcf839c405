//! # REST API for Publishers
//!
//! Endpoints for registering and looking up publishers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use super::error_response;
use super::mappers::publisher_mapper::PublisherMapper;
use crate::domain::commands::publisher::CreatePublisherCommand;
use crate::AppState;
use shared::CreatePublisherRequest;

/// Create a router for publisher related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/publishers", get(list_publishers).post(create_publisher))
        .route("/publishers/:publisher_id", get(get_publisher))
}

/// List all publishers ordered by name
pub async fn list_publishers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/publishers");

    match state.publisher_service.list_publishers().await {
        Ok(publishers) => (StatusCode::OK, Json(PublisherMapper::to_list_response(publishers))).into_response(),
        Err(e) => {
            error!("Failed to list publishers: {}", e);
            error_response(e)
        }
    }
}

/// Register a new publisher
pub async fn create_publisher(
    State(state): State<AppState>,
    Json(request): Json<CreatePublisherRequest>,
) -> impl IntoResponse {
    info!("POST /api/publishers - request: {:?}", request);

    let command = CreatePublisherCommand { name: request.name };

    match state.publisher_service.create_publisher(command).await {
        Ok(result) => (StatusCode::CREATED, Json(PublisherMapper::to_create_response(result))).into_response(),
        Err(e) => {
            error!("Failed to create publisher: {}", e);
            error_response(e)
        }
    }
}

/// Look up one publisher
pub async fn get_publisher(
    State(state): State<AppState>,
    Path(publisher_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/publishers/{}", publisher_id);

    match state.publisher_service.get_publisher(&publisher_id).await {
        Ok(publisher) => (
            StatusCode::OK,
            Json(PublisherMapper::to_publisher_response(publisher, "Publisher found".to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get publisher {}: {}", publisher_id, e);
            error_response(e)
        }
    }
}
