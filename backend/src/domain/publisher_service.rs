//! Publisher identity for the field service core.
//!
//! The core trusts the caller's publisher id and only checks that it resolves
//! to a known publisher before any write.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::publisher::{CreatePublisherCommand, CreatePublisherResult};
use crate::domain::errors::FieldServiceError;
use crate::domain::models::Publisher;
use crate::storage::{Connection, PublisherStorage};

pub const MAX_PUBLISHER_NAME_LENGTH: usize = 128;

#[derive(Clone)]
pub struct PublisherService<C: Connection> {
    publisher_repository: C::PublisherRepository,
}

impl<C: Connection> PublisherService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let publisher_repository = connection.create_publisher_repository();
        Self { publisher_repository }
    }

    pub async fn create_publisher(
        &self,
        command: CreatePublisherCommand,
    ) -> Result<CreatePublisherResult, FieldServiceError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(FieldServiceError::InvalidInput("Publisher name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_PUBLISHER_NAME_LENGTH {
            return Err(FieldServiceError::InvalidInput(format!(
                "Publisher name cannot exceed {} characters",
                MAX_PUBLISHER_NAME_LENGTH
            )));
        }

        let publisher = Publisher {
            id: Publisher::generate_id(),
            name: name.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.publisher_repository.store_publisher(&publisher).await?;

        info!("Created publisher {} ({})", publisher.id, publisher.name);

        Ok(CreatePublisherResult {
            publisher,
            success_message: "Publisher created successfully".to_string(),
        })
    }

    pub async fn list_publishers(&self) -> Result<Vec<Publisher>, FieldServiceError> {
        Ok(self.publisher_repository.list_publishers().await?)
    }

    pub async fn get_publisher(&self, publisher_id: &str) -> Result<Publisher, FieldServiceError> {
        match self.publisher_repository.get_publisher(publisher_id).await? {
            Some(publisher) => Ok(publisher),
            None => {
                warn!("Publisher id did not resolve: {}", publisher_id);
                Err(FieldServiceError::PublisherNotFound(publisher_id.to_string()))
            }
        }
    }

    /// Fail with an identity error unless `publisher_id` is known
    pub async fn ensure_exists(&self, publisher_id: &str) -> Result<(), FieldServiceError> {
        self.get_publisher(publisher_id).await.map(|_| ())
    }
}
