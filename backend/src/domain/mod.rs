//! # Domain Module
//!
//! Contains the business logic for field service reporting.
//!
//! ## Module Organization
//!
//! - **aggregator**: pure daily-to-monthly reduction (sums and distinct Bible studies)
//! - **daily_report_service**: daily report writes, reads and deletes, each
//!   followed by an explicit monthly rebuild
//! - **report_service**: congregation month and service year reports
//! - **publisher_service**: publisher identity checks and registration
//! - **validation**: submission validation and the negative-value policy
//!
//! ## Core Concepts
//!
//! - **Daily record**: one publisher's activity on one calendar day
//! - **Monthly record**: derived summary of a (publisher, month); it exists
//!   exactly when that month has daily records
//! - **Service year**: September through August, named by the year it ends in

pub mod aggregator;
pub mod commands;
pub mod daily_report_service;
pub mod errors;
pub mod models;
pub mod publisher_service;
pub mod report_service;
pub mod validation;

pub use daily_report_service::DailyReportService;
pub use errors::FieldServiceError;
pub use publisher_service::PublisherService;
pub use report_service::ReportService;
pub use validation::ValidationPolicy;
