//! Daily field service reports and their derived monthly records.
//!
//! Every write or delete of a daily record is followed, in the same call, by
//! an explicit rebuild of the (publisher, month) monthly record through the
//! pure [`aggregate_month`] reduction. The two steps are not transactional: a
//! failed rebuild is reported as [`FieldServiceError::Aggregation`] while the
//! daily write stays committed. Running [`DailyReportService::recalculate_month`]
//! afterwards repairs the monthly record since the rebuild is idempotent.
//!
//! ## Business Rules
//!
//! - One daily record per publisher per date; resubmitting replaces it
//! - A monthly record exists exactly when its month has daily records
//! - Only the owning publisher may delete a daily record

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::aggregator::{aggregate_month, compute_totals};
use crate::domain::commands::field_service::{
    DeleteDailyReportCommand, DeleteDailyReportResult, ListDailyReportsQuery, MonthSummaryResult,
    RecalculateMonthCommand, RecalculateMonthResult, SubmitDailyReportCommand, SubmitDailyReportResult,
    SummarizeMonthQuery,
};
use crate::domain::errors::FieldServiceError;
use crate::domain::models::{DailyRecord, MonthlyRecord, ServiceMonth};
use crate::domain::publisher_service::PublisherService;
use crate::domain::validation::ValidationPolicy;
use crate::storage::{Connection, DailyRecordStorage, MonthlyRecordStorage};

#[derive(Clone)]
pub struct DailyReportService<C: Connection> {
    daily_repository: C::DailyRecordRepository,
    monthly_repository: C::MonthlyRecordRepository,
    publisher_service: PublisherService<C>,
    validation_policy: ValidationPolicy,
}

impl<C: Connection> DailyReportService<C> {
    pub fn new(
        connection: Arc<C>,
        publisher_service: PublisherService<C>,
        validation_policy: ValidationPolicy,
    ) -> Self {
        Self {
            daily_repository: connection.create_daily_record_repository(),
            monthly_repository: connection.create_monthly_record_repository(),
            publisher_service,
            validation_policy,
        }
    }

    /// Store one day of activity, replacing any earlier report for that day,
    /// then rebuild the month.
    pub async fn submit_daily_report(
        &self,
        command: SubmitDailyReportCommand,
    ) -> Result<SubmitDailyReportResult, FieldServiceError> {
        info!("Submitting daily report: {:?}", command);

        self.publisher_service.ensure_exists(&command.publisher_id).await?;
        let activity = self.validation_policy.validate(&command)?;

        let now_rfc3339 = Utc::now().to_rfc3339();
        let record = DailyRecord::from_activity(&command.publisher_id, activity, &now_rfc3339);
        let daily_record = self.daily_repository.upsert_daily_record(&record).await?;

        let monthly_record = self
            .rebuild_after_change(&daily_record.publisher_id, daily_record.month())
            .await?;

        info!(
            "Stored daily report {} for publisher {} on {}",
            daily_record.id, daily_record.publisher_id, daily_record.date
        );

        Ok(SubmitDailyReportResult {
            daily_record,
            monthly_record,
            success_message: "Daily report saved successfully".to_string(),
        })
    }

    /// A publisher's daily records for one month, ordered by date
    pub async fn list_daily_reports(&self, query: ListDailyReportsQuery) -> Result<Vec<DailyRecord>, FieldServiceError> {
        debug!("Listing daily reports: {:?}", query);

        let month = ServiceMonth::parse(&query.month)?;
        self.publisher_service.ensure_exists(&query.publisher_id).await?;

        Ok(self.daily_repository.list_daily_records(&query.publisher_id, &month).await?)
    }

    /// Delete one of the publisher's own daily records, then rebuild its month.
    pub async fn delete_daily_report(
        &self,
        command: DeleteDailyReportCommand,
    ) -> Result<DeleteDailyReportResult, FieldServiceError> {
        info!("Deleting daily report: {:?}", command);

        self.publisher_service.ensure_exists(&command.publisher_id).await?;

        let record = match self
            .daily_repository
            .get_daily_record_for_publisher(&command.publisher_id, &command.record_id)
            .await?
        {
            Some(record) => record,
            None => return Err(self.classify_missing_record(&command).await?),
        };

        let deleted = self
            .daily_repository
            .delete_daily_record(&command.publisher_id, &command.record_id)
            .await?;
        if !deleted {
            // Removed by a concurrent request between the fetch and the delete
            return Err(FieldServiceError::RecordNotFound(command.record_id));
        }

        let monthly_record = self.rebuild_after_change(&record.publisher_id, record.month()).await?;

        info!(
            "Deleted daily report {} for publisher {} on {}",
            record.id, record.publisher_id, record.date
        );

        Ok(DeleteDailyReportResult {
            deleted_id: record.id,
            monthly_record,
            success_message: "Daily report deleted successfully".to_string(),
        })
    }

    /// Daily records with the stored monthly record and totals recomputed from
    /// the daily records, so a stale or missing monthly record never hides the
    /// real figures.
    pub async fn summarize_month(&self, query: SummarizeMonthQuery) -> Result<MonthSummaryResult, FieldServiceError> {
        debug!("Summarizing month: {:?}", query);

        let month = ServiceMonth::parse(&query.month)?;
        self.publisher_service.ensure_exists(&query.publisher_id).await?;

        let daily_records = self.daily_repository.list_daily_records(&query.publisher_id, &month).await?;
        let monthly_record = self.monthly_repository.get_monthly_record(&query.publisher_id, &month).await?;
        let totals = compute_totals(&daily_records)?;

        Ok(MonthSummaryResult {
            daily_records,
            monthly_record,
            totals,
        })
    }

    /// Rebuild a monthly record on demand
    pub async fn recalculate_month(
        &self,
        command: RecalculateMonthCommand,
    ) -> Result<RecalculateMonthResult, FieldServiceError> {
        info!("Recalculating month: {:?}", command);

        let month = ServiceMonth::parse(&command.month)?;
        self.publisher_service.ensure_exists(&command.publisher_id).await?;

        let monthly_record = self.rebuild_after_change(&command.publisher_id, month).await?;
        let success_message = match monthly_record {
            Some(_) => format!("Monthly record for {} recalculated", month),
            None => format!("No daily reports for {}; monthly record removed", month),
        };

        Ok(RecalculateMonthResult {
            monthly_record,
            success_message,
        })
    }

    async fn classify_missing_record(&self, command: &DeleteDailyReportCommand) -> Result<FieldServiceError, FieldServiceError> {
        let error = match self.daily_repository.get_daily_record(&command.record_id).await? {
            Some(_) => FieldServiceError::NotOwner {
                publisher_id: command.publisher_id.clone(),
                record_id: command.record_id.clone(),
            },
            None => FieldServiceError::RecordNotFound(command.record_id.clone()),
        };
        Ok(error)
    }

    async fn rebuild_after_change(
        &self,
        publisher_id: &str,
        month: ServiceMonth,
    ) -> Result<Option<MonthlyRecord>, FieldServiceError> {
        self.rebuild_monthly_record(publisher_id, &month).await.map_err(|source| {
            error!(
                "Monthly recalculation failed for publisher {} month {}: {:#}",
                publisher_id, month, source
            );
            FieldServiceError::Aggregation {
                publisher_id: publisher_id.to_string(),
                month: month.to_string(),
                source,
            }
        })
    }

    /// Fetch the month's daily records, aggregate them, then upsert the
    /// monthly record or delete it when the month is empty.
    async fn rebuild_monthly_record(&self, publisher_id: &str, month: &ServiceMonth) -> anyhow::Result<Option<MonthlyRecord>> {
        let records = self.daily_repository.list_daily_records(publisher_id, month).await?;

        match aggregate_month(&records)? {
            Some(aggregate) => {
                let monthly_record = aggregate.into_record(publisher_id, *month);
                self.monthly_repository.upsert_monthly_record(&monthly_record).await?;
                debug!(
                    "Monthly record {}: {} hours, {} bible students from {} day(s)",
                    monthly_record.id(),
                    monthly_record.hours,
                    monthly_record.bible_students,
                    monthly_record.report_days
                );
                Ok(Some(monthly_record))
            }
            None => {
                if self.monthly_repository.delete_monthly_record(publisher_id, month).await? {
                    info!(
                        "Removed monthly record for publisher {} month {}: no daily reports remain",
                        publisher_id, month
                    );
                }
                Ok(None)
            }
        }
    }
}
