pub mod daily_record_repository;
pub mod monthly_record_repository;
pub mod publisher_repository;

pub use daily_record_repository::DailyRecordRepository;
pub use monthly_record_repository::MonthlyRecordRepository;
pub use publisher_repository::PublisherRepository;
