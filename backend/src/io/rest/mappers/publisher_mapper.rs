use shared::{Publisher, PublisherListResponse, PublisherResponse};

use crate::domain::commands::publisher::CreatePublisherResult;
use crate::domain::models::Publisher as DomainPublisher;

pub struct PublisherMapper;

impl PublisherMapper {
    /// Convert domain Publisher to shared Publisher DTO
    pub fn to_dto(domain: DomainPublisher) -> Publisher {
        Publisher {
            id: domain.id,
            name: domain.name,
            created_at: domain.created_at,
        }
    }

    pub fn to_publisher_response(domain: DomainPublisher, success_message: String) -> PublisherResponse {
        PublisherResponse {
            publisher: Self::to_dto(domain),
            success_message,
        }
    }

    pub fn to_create_response(result: CreatePublisherResult) -> PublisherResponse {
        Self::to_publisher_response(result.publisher, result.success_message)
    }

    pub fn to_list_response(publishers: Vec<DomainPublisher>) -> PublisherListResponse {
        PublisherListResponse {
            publishers: publishers.into_iter().map(Self::to_dto).collect(),
        }
    }
}
