use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{MonthlyRecord, ServiceMonth};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::MonthlyRecordStorage;

/// Repository for derived monthly records
#[derive(Clone)]
pub struct MonthlyRecordRepository {
    db: DbConnection,
}

impl MonthlyRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &SqliteRow) -> Result<MonthlyRecord> {
        let month: String = row.try_get("month")?;
        Ok(MonthlyRecord {
            publisher_id: row.try_get("publisher_id")?,
            month: ServiceMonth::parse(&month)?,
            shared_in_ministry: row.try_get("shared_in_ministry")?,
            hours: row.try_get("hours")?,
            placements: row.try_get("placements")?,
            videos: row.try_get("videos")?,
            bible_students: row.try_get("bible_students")?,
            report_days: row.try_get("report_days")?,
            comments: row.try_get("comments")?,
        })
    }
}

#[async_trait]
impl MonthlyRecordStorage for MonthlyRecordRepository {
    async fn upsert_monthly_record(&self, record: &MonthlyRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_records (
                id, publisher_id, month, shared_in_ministry, hours, placements, videos,
                bible_students, report_days, comments
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (publisher_id, month) DO UPDATE SET
                shared_in_ministry = excluded.shared_in_ministry,
                hours = excluded.hours,
                placements = excluded.placements,
                videos = excluded.videos,
                bible_students = excluded.bible_students,
                report_days = excluded.report_days,
                comments = excluded.comments
            "#,
        )
        .bind(record.id())
        .bind(&record.publisher_id)
        .bind(record.month.to_string())
        .bind(record.shared_in_ministry)
        .bind(record.hours)
        .bind(record.placements)
        .bind(record.videos)
        .bind(record.bible_students)
        .bind(record.report_days)
        .bind(&record.comments)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_monthly_record(&self, publisher_id: &str, month: &ServiceMonth) -> Result<Option<MonthlyRecord>> {
        let row = sqlx::query(
            r#"
            SELECT publisher_id, month, shared_in_ministry, hours, placements, videos,
                   bible_students, report_days, comments
            FROM monthly_records
            WHERE publisher_id = ? AND month = ?
            "#,
        )
        .bind(publisher_id)
        .bind(month.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete_monthly_record(&self, publisher_id: &str, month: &ServiceMonth) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM monthly_records WHERE publisher_id = ? AND month = ?
            "#,
        )
        .bind(publisher_id)
        .bind(month.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_monthly_records_for_month(&self, month: &ServiceMonth) -> Result<Vec<MonthlyRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT m.publisher_id, m.month, m.shared_in_ministry, m.hours, m.placements, m.videos,
                   m.bible_students, m.report_days, m.comments
            FROM monthly_records m
            JOIN publishers p ON p.id = m.publisher_id
            WHERE m.month = ?
            ORDER BY p.name ASC, m.publisher_id ASC
            "#,
        )
        .bind(month.to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn list_monthly_records_in_range(
        &self,
        publisher_id: &str,
        from: &ServiceMonth,
        to: &ServiceMonth,
    ) -> Result<Vec<MonthlyRecord>> {
        // YYYY-MM strings sort chronologically
        let rows = sqlx::query(
            r#"
            SELECT publisher_id, month, shared_in_ministry, hours, placements, videos,
                   bible_students, report_days, comments
            FROM monthly_records
            WHERE publisher_id = ? AND month >= ? AND month <= ?
            ORDER BY month ASC
            "#,
        )
        .bind(publisher_id)
        .bind(from.to_string())
        .bind(to.to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Publisher;
    use crate::storage::sqlite::repositories::PublisherRepository;
    use crate::storage::traits::PublisherStorage;

    async fn setup_test() -> MonthlyRecordRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let publishers = PublisherRepository::new(db.clone());
        for (id, name) in [("p1", "Zoe"), ("p2", "Anna")] {
            publishers
                .store_publisher(&Publisher {
                    id: id.to_string(),
                    name: name.to_string(),
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                })
                .await
                .expect("Failed to store publisher");
        }
        MonthlyRecordRepository::new(db)
    }

    fn monthly(publisher_id: &str, month: &str, hours: f64) -> MonthlyRecord {
        MonthlyRecord {
            publisher_id: publisher_id.to_string(),
            month: ServiceMonth::parse(month).unwrap(),
            shared_in_ministry: true,
            hours,
            placements: 3,
            videos: 1,
            bible_students: 2,
            report_days: 4,
            comments: "generated".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_month() {
        let repo = setup_test().await;
        let month = ServiceMonth::parse("2024-03").unwrap();

        repo.upsert_monthly_record(&monthly("p1", "2024-03", 6.0)).await.unwrap();
        repo.upsert_monthly_record(&monthly("p1", "2024-03", 3.0)).await.unwrap();

        let stored = repo.get_monthly_record("p1", &month).await.unwrap();
        assert_eq!(stored, Some(monthly("p1", "2024-03", 3.0)));
        assert_eq!(repo.list_monthly_records_for_month(&month).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_monthly_record() {
        let repo = setup_test().await;
        let month = ServiceMonth::parse("2024-03").unwrap();
        repo.upsert_monthly_record(&monthly("p1", "2024-03", 6.0)).await.unwrap();

        assert!(repo.delete_monthly_record("p1", &month).await.unwrap());
        assert!(repo.get_monthly_record("p1", &month).await.unwrap().is_none());
        assert!(!repo.delete_monthly_record("p1", &month).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_month_orders_by_publisher_name() {
        let repo = setup_test().await;
        repo.upsert_monthly_record(&monthly("p1", "2024-03", 1.0)).await.unwrap();
        repo.upsert_monthly_record(&monthly("p2", "2024-03", 2.0)).await.unwrap();
        repo.upsert_monthly_record(&monthly("p2", "2024-04", 9.0)).await.unwrap();

        let month = ServiceMonth::parse("2024-03").unwrap();
        let publishers: Vec<String> = repo
            .list_monthly_records_for_month(&month)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.publisher_id)
            .collect();
        assert_eq!(publishers, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn test_list_in_range_is_inclusive_and_ordered() {
        let repo = setup_test().await;
        for month in ["2024-09", "2023-08", "2023-09", "2024-08", "2024-01"] {
            repo.upsert_monthly_record(&monthly("p1", month, 1.0)).await.unwrap();
        }

        let from = ServiceMonth::parse("2023-09").unwrap();
        let to = ServiceMonth::parse("2024-08").unwrap();
        let months: Vec<String> = repo
            .list_monthly_records_in_range("p1", &from, &to)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.month.to_string())
            .collect();
        assert_eq!(months, vec!["2023-09", "2024-01", "2024-08"]);
    }
}
