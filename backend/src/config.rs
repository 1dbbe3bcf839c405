//! Configuration for the field service backend
//!
//! Values come from defaults, then an optional TOML file, then command line
//! flags and their environment variables.

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::ValidationPolicy;

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("field-service")
}

fn default_database_url() -> String {
    format!("sqlite://{}", default_data_dir().join("field_service.db").display())
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "http://localhost:8080".to_string()
}

/// Backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// sqlx sqlite URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_http_host")]
    pub http_host: String,

    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Origin allowed by the CORS layer
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Treatment of negative hours, placements and videos
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            http_host: default_http_host(),
            http_port: default_http_port(),
            cors_origin: default_cors_origin(),
            validation_policy: ValidationPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Build the effective config: file (or defaults) with flag overrides applied
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(url) = &args.database_url {
            config.database_url = url.clone();
        }
        if let Some(host) = &args.host {
            config.http_host = host.clone();
        }
        if let Some(port) = args.port {
            config.http_port = port;
        }
        if let Some(origin) = &args.cors_origin {
            config.cors_origin = origin.clone();
        }
        if let Some(policy) = args.validation_policy {
            config.validation_policy = policy;
        }

        Ok(config)
    }

    /// Filesystem path of the sqlite database, if the URL names a file
    pub fn database_file(&self) -> Option<PathBuf> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }

    /// Address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "field-service")]
#[command(about = "Field service reporting backend")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// sqlite database URL
    #[arg(long, env = "FIELD_SERVICE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Interface to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port
    #[arg(short, long, env = "FIELD_SERVICE_PORT")]
    pub port: Option<u16>,

    /// Allowed CORS origin
    #[arg(long)]
    pub cors_origin: Option<String>,

    /// Negative value handling: reject, clamp or allow
    #[arg(long, env = "FIELD_SERVICE_VALIDATION_POLICY")]
    pub validation_policy: Option<ValidationPolicy>,
}
