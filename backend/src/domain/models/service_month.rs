//! Domain model for the year-month bucket used to aggregate field service.
use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::domain::errors::FieldServiceError;

/// Calendar month in which daily records are aggregated, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceMonth {
    year: i32,
    month: u32,
}

impl ServiceMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, FieldServiceError> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(FieldServiceError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Parse a strict `YYYY-MM` string
    pub fn parse(value: &str) -> Result<Self, FieldServiceError> {
        let invalid = || FieldServiceError::InvalidMonth(value.to_string());

        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        if !value[..4].bytes().all(|b| b.is_ascii_digit()) || !value[5..].bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..].parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// The month a calendar day belongs to
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Whether a calendar day falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First and last month of a service year.
    ///
    /// Service year `Y` runs from September of `Y - 1` through August of `Y`.
    pub fn service_year_bounds(service_year: i32) -> Result<(Self, Self), FieldServiceError> {
        let previous_year = service_year
            .checked_sub(1)
            .ok_or_else(|| FieldServiceError::InvalidMonth(format!("service year {}", service_year)))?;
        let start = Self::new(previous_year, 9)?;
        let end = Self::new(service_year, 8)?;
        Ok((start, end))
    }
}

impl fmt::Display for ServiceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar day
pub fn parse_service_date(value: &str) -> Result<NaiveDate, FieldServiceError> {
    if value.len() != 10 {
        return Err(FieldServiceError::InvalidInput(format!(
            "Date must be formatted as YYYY-MM-DD, got '{}'",
            value
        )));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        FieldServiceError::InvalidInput(format!("Date must be formatted as YYYY-MM-DD, got '{}'", value))
    })
}
