use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::BTreeSet;

use crate::domain::models::{DailyRecord, ServiceMonth};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::DailyRecordStorage;

const DAILY_RECORD_COLUMNS: &str = "id, publisher_id, date, shared_in_ministry, hours, placements, videos, \
     bible_study_ids, comments, created_at, updated_at";

/// Repository for daily field service records
#[derive(Clone)]
pub struct DailyRecordRepository {
    db: DbConnection,
}

impl DailyRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &SqliteRow) -> Result<DailyRecord> {
        let date: String = row.try_get("date")?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Stored daily record has an invalid date '{}'", date))?;
        let ids_json: String = row.try_get("bible_study_ids")?;
        let bible_study_ids: BTreeSet<String> = serde_json::from_str(&ids_json)
            .with_context(|| format!("Stored daily record has invalid bible study ids '{}'", ids_json))?;

        Ok(DailyRecord {
            id: row.try_get("id")?,
            publisher_id: row.try_get("publisher_id")?,
            date,
            shared_in_ministry: row.try_get("shared_in_ministry")?,
            hours: row.try_get("hours")?,
            placements: row.try_get("placements")?,
            videos: row.try_get("videos")?,
            bible_study_ids,
            comments: row.try_get("comments")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn get_by_publisher_and_date(&self, publisher_id: &str, date: &NaiveDate) -> Result<Option<DailyRecord>> {
        let sql = format!(
            "SELECT {} FROM daily_records WHERE publisher_id = ? AND date = ?",
            DAILY_RECORD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(publisher_id)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }
}

#[async_trait]
impl DailyRecordStorage for DailyRecordRepository {
    async fn upsert_daily_record(&self, record: &DailyRecord) -> Result<DailyRecord> {
        let bible_study_ids = serde_json::to_string(&record.bible_study_ids)?;

        sqlx::query(
            r#"
            INSERT INTO daily_records (
                id, publisher_id, date, month, shared_in_ministry, hours, placements, videos,
                bible_study_ids, comments, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (publisher_id, date) DO UPDATE SET
                month = excluded.month,
                shared_in_ministry = excluded.shared_in_ministry,
                hours = excluded.hours,
                placements = excluded.placements,
                videos = excluded.videos,
                bible_study_ids = excluded.bible_study_ids,
                comments = excluded.comments,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.publisher_id)
        .bind(record.date.format("%Y-%m-%d").to_string())
        .bind(record.month().to_string())
        .bind(record.shared_in_ministry)
        .bind(record.hours)
        .bind(record.placements)
        .bind(record.videos)
        .bind(bible_study_ids)
        .bind(&record.comments)
        .bind(&record.created_at)
        .bind(&record.updated_at)
        .execute(self.db.pool())
        .await?;

        self.get_by_publisher_and_date(&record.publisher_id, &record.date)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Daily record for {} on {} vanished after upsert", record.publisher_id, record.date))
    }

    async fn get_daily_record(&self, record_id: &str) -> Result<Option<DailyRecord>> {
        let sql = format!("SELECT {} FROM daily_records WHERE id = ?", DAILY_RECORD_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(record_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn get_daily_record_for_publisher(
        &self,
        publisher_id: &str,
        record_id: &str,
    ) -> Result<Option<DailyRecord>> {
        let sql = format!(
            "SELECT {} FROM daily_records WHERE id = ? AND publisher_id = ?",
            DAILY_RECORD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(record_id)
            .bind(publisher_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn list_daily_records(&self, publisher_id: &str, month: &ServiceMonth) -> Result<Vec<DailyRecord>> {
        let sql = format!(
            "SELECT {} FROM daily_records WHERE publisher_id = ? AND month = ? ORDER BY date ASC",
            DAILY_RECORD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(publisher_id)
            .bind(month.to_string())
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn delete_daily_record(&self, publisher_id: &str, record_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM daily_records WHERE id = ? AND publisher_id = ?
            "#,
        )
        .bind(record_id)
        .bind(publisher_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Publisher;
    use crate::storage::sqlite::repositories::PublisherRepository;
    use crate::storage::traits::PublisherStorage;

    async fn setup_test() -> DailyRecordRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let publishers = PublisherRepository::new(db.clone());
        for id in ["p1", "p2"] {
            publishers
                .store_publisher(&Publisher {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                })
                .await
                .expect("Failed to store publisher");
        }
        DailyRecordRepository::new(db)
    }

    fn record(id: &str, publisher_id: &str, date: &str, hours: f64, studies: &[&str]) -> DailyRecord {
        DailyRecord {
            id: id.to_string(),
            publisher_id: publisher_id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            shared_in_ministry: true,
            hours,
            placements: 1,
            videos: 2,
            bible_study_ids: studies.iter().map(|s| s.to_string()).collect(),
            comments: Some("door to door".to_string()),
            created_at: "2024-03-01T10:00:00Z".to_string(),
            updated_at: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get_daily_record() {
        let repo = setup_test().await;
        let original = record("r1", "p1", "2024-03-01", 2.5, &["A", "B"]);

        let stored = repo.upsert_daily_record(&original).await.expect("Failed to upsert");
        assert_eq!(stored, original);

        let fetched = repo.get_daily_record("r1").await.unwrap();
        assert_eq!(fetched, Some(original));
    }

    #[tokio::test]
    async fn test_upsert_same_day_replaces_and_keeps_identity() {
        let repo = setup_test().await;
        repo.upsert_daily_record(&record("r1", "p1", "2024-03-01", 2.0, &["A"]))
            .await
            .unwrap();

        let mut correction = record("r2", "p1", "2024-03-01", 4.0, &["B"]);
        correction.updated_at = "2024-03-02T09:00:00Z".to_string();
        let stored = repo.upsert_daily_record(&correction).await.unwrap();

        assert_eq!(stored.id, "r1");
        assert_eq!(stored.created_at, "2024-03-01T10:00:00Z");
        assert_eq!(stored.updated_at, "2024-03-02T09:00:00Z");
        assert_eq!(stored.hours, 4.0);
        assert!(stored.bible_study_ids.contains("B"));
        assert!(!stored.bible_study_ids.contains("A"));

        let month = ServiceMonth::parse("2024-03").unwrap();
        assert_eq!(repo.list_daily_records("p1", &month).await.unwrap().len(), 1);
        assert!(repo.get_daily_record("r2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_month_and_orders_by_date() {
        let repo = setup_test().await;
        repo.upsert_daily_record(&record("r3", "p1", "2024-03-20", 1.0, &[])).await.unwrap();
        repo.upsert_daily_record(&record("r1", "p1", "2024-03-02", 1.0, &[])).await.unwrap();
        repo.upsert_daily_record(&record("r2", "p1", "2024-04-01", 1.0, &[])).await.unwrap();
        repo.upsert_daily_record(&record("r4", "p2", "2024-03-05", 1.0, &[])).await.unwrap();

        let month = ServiceMonth::parse("2024-03").unwrap();
        let ids: Vec<String> = repo
            .list_daily_records("p1", &month)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let repo = setup_test().await;
        repo.upsert_daily_record(&record("r1", "p1", "2024-03-01", 1.0, &[])).await.unwrap();

        assert!(repo.get_daily_record_for_publisher("p2", "r1").await.unwrap().is_none());
        assert!(!repo.delete_daily_record("p2", "r1").await.unwrap());
        assert!(repo.get_daily_record("r1").await.unwrap().is_some());

        assert!(repo.delete_daily_record("p1", "r1").await.unwrap());
        assert!(repo.get_daily_record("r1").await.unwrap().is_none());
        assert!(!repo.delete_daily_record("p1", "r1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_publisher_violates_foreign_key() {
        let repo = setup_test().await;
        let result = repo
            .upsert_daily_record(&record("r1", "ghost", "2024-03-01", 1.0, &[]))
            .await;
        assert!(result.is_err());
    }
}
