use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{DailyRecordRepository, MonthlyRecordRepository, PublisherRepository};
use crate::storage::traits::Connection;

const MAX_CONNECTIONS: u32 = 5;

/// DbConnection manages the sqlite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open the sqlite database at `url`, creating the file when it is missing,
    /// and make sure the schema exists.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid sqlite URL '{}'", url))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize an isolated in-memory database for tests.
    ///
    /// The pool holds exactly one connection that never expires, since an
    /// in-memory sqlite database lives only as long as its connection.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS publishers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_publishers_name
            ON publishers(name);
            "#,
        )
        .execute(pool)
        .await?;

        // One row per publisher per day; `month` is written from `date` only
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_records (
                id TEXT PRIMARY KEY,
                publisher_id TEXT NOT NULL,
                date TEXT NOT NULL,
                month TEXT NOT NULL,
                shared_in_ministry BOOLEAN NOT NULL DEFAULT FALSE,
                hours REAL NOT NULL DEFAULT 0,
                placements INTEGER NOT NULL DEFAULT 0,
                videos INTEGER NOT NULL DEFAULT 0,
                bible_study_ids TEXT NOT NULL DEFAULT '[]',
                comments TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (publisher_id, date),
                FOREIGN KEY (publisher_id) REFERENCES publishers (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_daily_records_publisher_month
            ON daily_records(publisher_id, month);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS monthly_records (
                id TEXT PRIMARY KEY,
                publisher_id TEXT NOT NULL,
                month TEXT NOT NULL,
                shared_in_ministry BOOLEAN NOT NULL DEFAULT FALSE,
                hours REAL NOT NULL DEFAULT 0,
                placements INTEGER NOT NULL DEFAULT 0,
                videos INTEGER NOT NULL DEFAULT 0,
                bible_students INTEGER NOT NULL DEFAULT 0,
                report_days INTEGER NOT NULL DEFAULT 0,
                comments TEXT NOT NULL,
                UNIQUE (publisher_id, month),
                FOREIGN KEY (publisher_id) REFERENCES publishers (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_monthly_records_month
            ON monthly_records(month);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type PublisherRepository = PublisherRepository;
    type DailyRecordRepository = DailyRecordRepository;
    type MonthlyRecordRepository = MonthlyRecordRepository;

    fn create_publisher_repository(&self) -> Self::PublisherRepository {
        PublisherRepository::new(self.clone())
    }

    fn create_daily_record_repository(&self) -> Self::DailyRecordRepository {
        DailyRecordRepository::new(self.clone())
    }

    fn create_monthly_record_repository(&self) -> Self::MonthlyRecordRepository {
        MonthlyRecordRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Publisher;
    use crate::storage::traits::PublisherStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_creates_file_and_reopens_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("field_service.db");
        let url = format!("sqlite://{}", path.display());

        let db = DbConnection::new(&url).await.expect("Failed to create database");
        assert!(path.exists());
        db.create_publisher_repository()
            .store_publisher(&Publisher {
                id: "p1".to_string(),
                name: "Ana".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
            })
            .await
            .unwrap();
        db.pool().close().await;

        let reopened = DbConnection::new(&url).await.expect("Failed to reopen database");
        let publisher = reopened.create_publisher_repository().get_publisher("p1").await.unwrap();
        assert_eq!(publisher.map(|p| p.name), Some("Ana".to_string()));
    }

    #[tokio::test]
    async fn test_new_fails_when_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("missing").join("field_service.db").display());
        assert!(DbConnection::new(&url).await.is_err());
    }
}
