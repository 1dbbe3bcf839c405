//! # Storage Module
//!
//! Handles all data persistence for the field service backend.
//!
//! The domain layer depends only on the traits in [`traits`]; the sqlite
//! implementation lives in [`sqlite`] and is built on SQLx runtime queries.
//!
//! - **publishers**: identity records the core checks before any write
//! - **daily_records**: one row per (publisher, date), replaced on resubmission
//! - **monthly_records**: one derived row per (publisher, month), absent when
//!   the month has no daily records

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{Connection, DailyRecordStorage, MonthlyRecordStorage, PublisherStorage};
