//! Cross-publisher and service-year reports built from stored monthly records.

use std::sync::Arc;
use tracing::info;

use crate::domain::commands::reports::{
    CongregationMonthQuery, CongregationMonthResult, ServiceYearQuery, ServiceYearResult,
};
use crate::domain::aggregator::checked_total;
use crate::domain::errors::FieldServiceError;
use crate::domain::models::{MonthTotals, MonthlyRecord, ServiceMonth};
use crate::domain::publisher_service::PublisherService;
use crate::storage::{Connection, MonthlyRecordStorage};

#[derive(Clone)]
pub struct ReportService<C: Connection> {
    monthly_repository: C::MonthlyRecordRepository,
    publisher_service: PublisherService<C>,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: Arc<C>, publisher_service: PublisherService<C>) -> Self {
        Self {
            monthly_repository: connection.create_monthly_record_repository(),
            publisher_service,
        }
    }

    /// Every publisher's monthly record for `month`, ordered by publisher name
    pub async fn congregation_month_report(
        &self,
        query: CongregationMonthQuery,
    ) -> Result<CongregationMonthResult, FieldServiceError> {
        let month = ServiceMonth::parse(&query.month)?;
        let monthly_records = self.monthly_repository.list_monthly_records_for_month(&month).await?;
        let totals = sum_monthly_records(&monthly_records)?;

        info!(
            "Congregation report for {}: {} publisher(s) reported",
            month,
            monthly_records.len()
        );

        Ok(CongregationMonthResult {
            month,
            monthly_records,
            totals,
        })
    }

    /// A publisher's months from September of `service_year - 1` through
    /// August of `service_year`
    pub async fn service_year_report(&self, query: ServiceYearQuery) -> Result<ServiceYearResult, FieldServiceError> {
        self.publisher_service.ensure_exists(&query.publisher_id).await?;
        let (from, to) = ServiceMonth::service_year_bounds(query.service_year)?;

        let monthly_records = self
            .monthly_repository
            .list_monthly_records_in_range(&query.publisher_id, &from, &to)
            .await?;
        let totals = sum_monthly_records(&monthly_records)?;
        let average_bible_students = if monthly_records.is_empty() {
            0.0
        } else {
            totals.bible_studies as f64 / monthly_records.len() as f64
        };

        Ok(ServiceYearResult {
            service_year: query.service_year,
            monthly_records,
            totals,
            average_bible_students,
        })
    }
}

/// Totals across monthly records. Bible studies are summed per publisher-month
/// since distinct ids are only meaningful within one month.
fn sum_monthly_records(records: &[MonthlyRecord]) -> Result<MonthTotals, FieldServiceError> {
    let mut totals = MonthTotals::default();
    for record in records {
        totals.hours += record.hours;
        totals.placements = checked_total("Placements", totals.placements, record.placements)?;
        totals.videos = checked_total("Videos", totals.videos, record.videos)?;
        totals.bible_studies = checked_total("Bible studies", totals.bible_studies, record.bible_students)?;
    }
    Ok(totals)
}
