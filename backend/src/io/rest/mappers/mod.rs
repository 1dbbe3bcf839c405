pub mod field_service_mapper;
pub mod publisher_mapper;
