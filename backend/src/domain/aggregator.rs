//! Pure daily-to-monthly field service aggregation.
//!
//! The monthly record for a (publisher, month) is a function of that month's
//! daily records and nothing else. Both the write and delete paths call
//! [`aggregate_month`] explicitly; the read path uses [`compute_totals`] to
//! recompute totals without trusting the stored monthly record.
//!
//! Records are reduced in date order so the floating point hour sum does not
//! depend on the order the caller passes them in. Bible study ids are counted
//! with set semantics: a student visited on several days counts once.

use std::collections::BTreeSet;

use crate::domain::errors::FieldServiceError;
use crate::domain::models::{DailyRecord, MonthTotals, MonthlyRecord, ServiceMonth};

/// Values produced by reducing one month of daily records
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub shared_in_ministry: bool,
    pub hours: f64,
    pub placements: i64,
    pub videos: i64,
    pub bible_students: i64,
    pub report_days: i64,
    pub comments: String,
}

impl MonthlyAggregate {
    pub fn into_record(self, publisher_id: &str, month: ServiceMonth) -> MonthlyRecord {
        MonthlyRecord {
            publisher_id: publisher_id.to_string(),
            month,
            shared_in_ministry: self.shared_in_ministry,
            hours: self.hours,
            placements: self.placements,
            videos: self.videos,
            bible_students: self.bible_students,
            report_days: self.report_days,
            comments: self.comments,
        }
    }
}

/// Reduce a month of daily records. Returns `None` for an empty set, in which
/// case no monthly record may exist.
pub fn aggregate_month(records: &[DailyRecord]) -> Result<Option<MonthlyAggregate>, FieldServiceError> {
    if records.is_empty() {
        return Ok(None);
    }

    let totals = compute_totals(records)?;
    let ministry_days = records.iter().filter(|r| r.shared_in_ministry).count();
    let report_days = records.len();

    Ok(Some(MonthlyAggregate {
        shared_in_ministry: ministry_days > 0,
        hours: totals.hours,
        placements: totals.placements,
        videos: totals.videos,
        bible_students: totals.bible_studies,
        report_days: report_days as i64,
        comments: describe_month(report_days, ministry_days, totals.bible_studies),
    }))
}

/// Sum activity and count distinct Bible studies across `records`.
///
/// Counter totals that leave the `i64` range are an error rather than a
/// wrapped value.
pub fn compute_totals(records: &[DailyRecord]) -> Result<MonthTotals, FieldServiceError> {
    let mut ordered: Vec<&DailyRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut totals = MonthTotals::default();
    for record in ordered {
        totals.hours += record.hours;
        totals.placements = checked_total("Placements", totals.placements, record.placements)?;
        totals.videos = checked_total("Videos", totals.videos, record.videos)?;
    }
    totals.bible_studies = unique_bible_studies(records).len() as i64;
    Ok(totals)
}

/// Add `value` to a running counter total
pub fn checked_total(field: &str, total: i64, value: i64) -> Result<i64, FieldServiceError> {
    total
        .checked_add(value)
        .ok_or_else(|| FieldServiceError::InvalidInput(format!("{} total is out of range", field)))
}

/// Distinct Bible study ids referenced by any of `records`
pub fn unique_bible_studies(records: &[DailyRecord]) -> BTreeSet<&str> {
    records
        .iter()
        .flat_map(|record| record.bible_study_ids.iter().map(String::as_str))
        .collect()
}

fn describe_month(report_days: usize, ministry_days: usize, bible_students: i64) -> String {
    format!(
        "Aggregated from {} daily report(s); shared in ministry on {} day(s); {} unique Bible student(s)",
        report_days, ministry_days, bible_students
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, hours: f64, studies: &[&str]) -> DailyRecord {
        DailyRecord {
            id: format!("daily-{}", day),
            publisher_id: "publisher-p".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            shared_in_ministry: hours > 0.0,
            hours,
            placements: 0,
            videos: 0,
            bible_study_ids: studies.iter().map(|s| s.to_string()).collect(),
            comments: None,
            created_at: "2024-03-01T00:00:00Z".to_string(),
            updated_at: "2024-03-01T00:00:00Z".to_string(),
        }
    }

    fn march_scenario() -> Vec<DailyRecord> {
        vec![
            record(1, 2.0, &["A"]),
            record(2, 3.0, &["A", "B"]),
            record(3, 1.0, &["B"]),
        ]
    }

    #[test]
    fn test_empty_month_has_no_aggregate() {
        assert_eq!(aggregate_month(&[]).unwrap(), None);
        assert_eq!(compute_totals(&[]).unwrap(), MonthTotals::default());
    }

    #[test]
    fn test_scenario_counts_each_student_once() {
        let aggregate = aggregate_month(&march_scenario()).unwrap().unwrap();

        assert_eq!(aggregate.hours, 6.0);
        assert_eq!(aggregate.bible_students, 2);
        assert_eq!(aggregate.report_days, 3);
        assert!(aggregate.shared_in_ministry);
        assert_eq!(
            aggregate.comments,
            "Aggregated from 3 daily report(s); shared in ministry on 3 day(s); 2 unique Bible student(s)"
        );
    }

    #[test]
    fn test_student_repeated_on_many_days_counts_once() {
        let records: Vec<DailyRecord> = (1..=5).map(|day| record(day, 1.0, &["S1"])).collect();
        let aggregate = aggregate_month(&records).unwrap().unwrap();
        assert_eq!(aggregate.bible_students, 1);
        assert_eq!(unique_bible_studies(&records).len(), 1);
    }

    #[test]
    fn test_sums_placements_and_videos() {
        let mut first = record(4, 1.5, &[]);
        first.placements = 3;
        first.videos = 1;
        let mut second = record(9, 0.25, &[]);
        second.placements = 2;
        second.videos = 4;

        let totals = compute_totals(&[first, second]).unwrap();
        assert_eq!(totals.hours, 1.75);
        assert_eq!(totals.placements, 5);
        assert_eq!(totals.videos, 5);
        assert_eq!(totals.bible_studies, 0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = march_scenario();
        let first = aggregate_month(&records).unwrap();
        for _ in 0..5 {
            assert_eq!(aggregate_month(&records).unwrap(), first);
        }
    }

    #[test]
    fn test_aggregation_ignores_input_order() {
        let mut records = vec![
            record(7, 0.1, &["X"]),
            record(1, 0.2, &["Y", "X"]),
            record(15, 0.3, &["Z"]),
            record(20, 1.7, &[]),
        ];
        let expected = aggregate_month(&records).unwrap().unwrap();

        records.reverse();
        assert_eq!(aggregate_month(&records).unwrap().unwrap(), expected);

        records.swap(0, 2);
        assert_eq!(aggregate_month(&records).unwrap().unwrap(), expected);
        assert_eq!(expected.bible_students, 3);
    }

    #[test]
    fn test_ministry_days_only_count_shared_days() {
        let mut quiet_day = record(5, 0.0, &[]);
        quiet_day.shared_in_ministry = false;
        let records = vec![record(4, 2.0, &[]), quiet_day];

        let aggregate = aggregate_month(&records).unwrap().unwrap();
        assert!(aggregate.comments.contains("shared in ministry on 1 day(s)"));
        assert_eq!(aggregate.report_days, 2);
    }

    #[test]
    fn test_into_record_uses_deterministic_id() {
        let month = ServiceMonth::parse("2024-03").unwrap();
        let monthly = aggregate_month(&march_scenario())
            .unwrap()
            .unwrap()
            .into_record("publisher-p", month);
        assert_eq!(monthly.id(), "monthly::publisher-p::2024-03");
        assert_eq!(monthly.month, month);
    }

    #[test]
    fn test_counter_overflow_is_an_error() {
        let mut first = record(1, 1.0, &[]);
        first.placements = i64::MAX;
        let mut second = record(2, 1.0, &[]);
        second.placements = 1;

        let err = compute_totals(&[first.clone(), second.clone()]).unwrap_err();
        assert!(matches!(err, FieldServiceError::InvalidInput(_)));
        assert!(aggregate_month(&[first, second]).is_err());

        let mut low = record(3, 1.0, &[]);
        low.videos = i64::MIN;
        let mut lower = record(4, 1.0, &[]);
        lower.videos = -1;
        assert!(compute_totals(&[low, lower]).is_err());
    }
}
