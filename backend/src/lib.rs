//! # Field Service Backend
//!
//! Publishers submit one report per day of field service. Every write
//! rebuilds the publisher's monthly record for the affected month, and the
//! monthly records feed congregation and service year reports.
//!
//! ## Layers
//!
//! - **domain**: services, aggregation and validation
//! - **storage**: repository traits and their sqlite implementation
//! - **io::rest**: axum handlers and DTO mappers
//! - **config**: file and command line configuration

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use config::AppConfig;
use domain::{DailyReportService, PublisherService, ReportService, ValidationPolicy};
use storage::DbConnection;

/// Services shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub publisher_service: PublisherService<DbConnection>,
    pub daily_report_service: DailyReportService<DbConnection>,
    pub report_service: ReportService<DbConnection>,
}

/// Wire the services over one database connection
pub fn build_app_state(db: DbConnection, validation_policy: ValidationPolicy) -> AppState {
    let db = Arc::new(db);
    let publisher_service = PublisherService::new(db.clone());
    let daily_report_service = DailyReportService::new(db.clone(), publisher_service.clone(), validation_policy);
    let report_service = ReportService::new(db, publisher_service.clone());

    AppState {
        publisher_service,
        daily_report_service,
        report_service,
    }
}

/// Open the database and build the application state
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Validation policy: {}", config.validation_policy);
    Ok(build_app_state(db, config.validation_policy))
}

/// Build the HTTP router with tracing and CORS layers
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::rest::publisher_apis::router())
        .merge(io::rest::field_service_apis::router())
        .merge(io::rest::report_apis::router());

    Ok(Router::new()
        .route("/health", get(io::rest::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
