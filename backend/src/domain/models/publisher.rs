//! Domain model for a publisher.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    pub created_at: String, // RFC 3339 timestamp
}

impl Publisher {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
