use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::Publisher;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::PublisherStorage;

/// Repository for publisher operations
#[derive(Clone)]
pub struct PublisherRepository {
    db: DbConnection,
}

impl PublisherRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PublisherStorage for PublisherRepository {
    async fn store_publisher(&self, publisher: &Publisher) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO publishers (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&publisher.id)
        .bind(&publisher.name)
        .bind(&publisher.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_publisher(&self, publisher_id: &str) -> Result<Option<Publisher>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM publishers
            WHERE id = ?
            "#,
        )
        .bind(publisher_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Publisher {
                id: r.get("id"),
                name: r.get("name"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }

    async fn list_publishers(&self) -> Result<Vec<Publisher>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM publishers
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let publishers = rows
            .iter()
            .map(|row| Publisher {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(publishers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> PublisherRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        PublisherRepository::new(db)
    }

    fn publisher(id: &str, name: &str) -> Publisher {
        Publisher {
            id: id.to_string(),
            name: name.to_string(),
            created_at: "2024-03-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_publisher() {
        let repo = setup_test().await;
        repo.store_publisher(&publisher("p1", "Anna")).await.expect("Failed to store publisher");

        let stored = repo.get_publisher("p1").await.expect("Query failed");
        assert_eq!(stored, Some(publisher("p1", "Anna")));

        let missing = repo.get_publisher("nope").await.expect("Query failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_publishers_ordered_by_name() {
        let repo = setup_test().await;
        repo.store_publisher(&publisher("p1", "Zoe")).await.unwrap();
        repo.store_publisher(&publisher("p2", "Anna")).await.unwrap();
        repo.store_publisher(&publisher("p3", "Mark")).await.unwrap();

        let names: Vec<String> = repo
            .list_publishers()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Anna", "Mark", "Zoe"]);
    }

    #[tokio::test]
    async fn test_duplicate_publisher_id_is_rejected() {
        let repo = setup_test().await;
        repo.store_publisher(&publisher("p1", "Anna")).await.unwrap();
        assert!(repo.store_publisher(&publisher("p1", "Other")).await.is_err());
    }
}
