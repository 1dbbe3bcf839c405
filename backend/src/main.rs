//! Field service backend server
//!
//! ```bash
//! # Defaults: 127.0.0.1:3000, database in the local data directory
//! field-service
//!
//! # Custom config file and port
//! field-service --config /etc/field-service.toml --port 3100
//!
//! # Store negative corrections as zero instead of rejecting them
//! FIELD_SERVICE_VALIDATION_POLICY=clamp field-service
//! ```

use clap::Parser;
use field_service_backend::config::{AppConfig, CliArgs};
use field_service_backend::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("field_service_backend=info,field_service=info,tower_http=info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = AppConfig::from_args(&args)?;

    if let Some(parent) = config.database_file().as_deref().and_then(|path| path.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Setting up database");
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors_origin)?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
