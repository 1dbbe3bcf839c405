//! Validation of submitted daily activity.
//!
//! Numeric fields are declared non-negative, but negative submissions have been
//! used as manual corrections. [`ValidationPolicy`] decides what happens to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::commands::field_service::SubmitDailyReportCommand;
use crate::domain::errors::FieldServiceError;
use crate::domain::models::{parse_service_date, DailyActivity};

pub const MAX_HOURS_PER_DAY: f64 = 24.0;
pub const MAX_PLACEMENTS_PER_DAY: i64 = 1_000;
pub const MAX_VIDEOS_PER_DAY: i64 = 1_000;
pub const MAX_COMMENT_LENGTH: usize = 512;

/// How negative hours, placements and videos are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Negative values are invalid input
    #[default]
    Reject,
    /// Negative values are stored as zero
    Clamp,
    /// Negative values are stored as given
    Allow,
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            "allow" => Ok(Self::Allow),
            other => Err(format!(
                "Unknown validation policy '{}', expected reject, clamp or allow",
                other
            )),
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
            Self::Allow => "allow",
        };
        f.write_str(name)
    }
}

impl ValidationPolicy {
    fn apply_f64(&self, field: &str, value: f64) -> Result<f64, FieldServiceError> {
        if value >= 0.0 {
            return Ok(value);
        }
        match self {
            Self::Reject => Err(FieldServiceError::InvalidInput(format!(
                "{} cannot be negative (got {})",
                field, value
            ))),
            Self::Clamp => Ok(0.0),
            Self::Allow => Ok(value),
        }
    }

    fn apply_i64(&self, field: &str, value: i64) -> Result<i64, FieldServiceError> {
        if value >= 0 {
            return Ok(value);
        }
        match self {
            Self::Reject => Err(FieldServiceError::InvalidInput(format!(
                "{} cannot be negative (got {})",
                field, value
            ))),
            Self::Clamp => Ok(0),
            Self::Allow => Ok(value),
        }
    }

    /// Turn a raw submission into storable activity.
    ///
    /// Absent numbers default to 0. Bible study ids are trimmed, blanks are
    /// dropped and duplicates collapse. When `shared_in_ministry` is absent it
    /// is true if any activity was reported.
    pub fn validate(&self, command: &SubmitDailyReportCommand) -> Result<DailyActivity, FieldServiceError> {
        let date = parse_service_date(command.date.trim())?;

        let hours = command.hours.unwrap_or(0.0);
        if !hours.is_finite() {
            return Err(FieldServiceError::InvalidInput("Hours must be a finite number".to_string()));
        }
        if hours.abs() > MAX_HOURS_PER_DAY {
            return Err(FieldServiceError::InvalidInput(format!(
                "Hours cannot exceed {} per day (got {})",
                MAX_HOURS_PER_DAY, hours
            )));
        }
        let hours = self.apply_f64("Hours", hours)?;
        let placements = command.placements.unwrap_or(0);
        check_daily_count("Placements", placements, MAX_PLACEMENTS_PER_DAY)?;
        let placements = self.apply_i64("Placements", placements)?;
        let videos = command.videos.unwrap_or(0);
        check_daily_count("Videos", videos, MAX_VIDEOS_PER_DAY)?;
        let videos = self.apply_i64("Videos", videos)?;

        let bible_study_ids: BTreeSet<String> = command
            .bible_study_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        let comments = match command.comments.as_deref().map(str::trim) {
            Some(text) if text.chars().count() > MAX_COMMENT_LENGTH => {
                return Err(FieldServiceError::InvalidInput(format!(
                    "Comments cannot exceed {} characters",
                    MAX_COMMENT_LENGTH
                )));
            }
            Some(text) if !text.is_empty() => Some(text.to_string()),
            _ => None,
        };

        let shared_in_ministry = command.shared_in_ministry.unwrap_or(
            hours > 0.0 || placements > 0 || videos > 0 || !bible_study_ids.is_empty(),
        );

        Ok(DailyActivity {
            date,
            shared_in_ministry,
            hours,
            placements,
            videos,
            bible_study_ids,
            comments,
        })
    }
}

/// Bound the magnitude of a per-day counter, negative corrections included
fn check_daily_count(field: &str, value: i64, max: i64) -> Result<(), FieldServiceError> {
    if value.unsigned_abs() > max.unsigned_abs() {
        return Err(FieldServiceError::InvalidInput(format!(
            "{} cannot exceed {} per day (got {})",
            field, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> SubmitDailyReportCommand {
        SubmitDailyReportCommand {
            publisher_id: "publisher-p".to_string(),
            date: "2024-03-05".to_string(),
            shared_in_ministry: None,
            hours: None,
            placements: None,
            videos: None,
            bible_study_ids: Vec::new(),
            comments: None,
        }
    }

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let activity = ValidationPolicy::Reject.validate(&command()).unwrap();
        assert_eq!(activity.hours, 0.0);
        assert_eq!(activity.placements, 0);
        assert_eq!(activity.videos, 0);
        assert!(!activity.shared_in_ministry);
        assert_eq!(activity.comments, None);
    }

    #[test]
    fn test_shared_in_ministry_derived_from_activity() {
        let mut cmd = command();
        cmd.bible_study_ids = vec!["study-1".to_string()];
        assert!(ValidationPolicy::Reject.validate(&cmd).unwrap().shared_in_ministry);

        cmd.shared_in_ministry = Some(false);
        assert!(!ValidationPolicy::Reject.validate(&cmd).unwrap().shared_in_ministry);
    }

    #[test]
    fn test_negative_values_follow_policy() {
        let mut cmd = command();
        cmd.hours = Some(-2.0);
        cmd.videos = Some(-1);

        let err = ValidationPolicy::Reject.validate(&cmd).unwrap_err();
        assert!(matches!(err, FieldServiceError::InvalidInput(_)));

        let clamped = ValidationPolicy::Clamp.validate(&cmd).unwrap();
        assert_eq!(clamped.hours, 0.0);
        assert_eq!(clamped.videos, 0);

        let allowed = ValidationPolicy::Allow.validate(&cmd).unwrap();
        assert_eq!(allowed.hours, -2.0);
        assert_eq!(allowed.videos, -1);
    }

    #[test]
    fn test_rejects_impossible_hours() {
        let mut cmd = command();
        cmd.hours = Some(25.0);
        assert!(ValidationPolicy::Allow.validate(&cmd).is_err());

        cmd.hours = Some(f64::NAN);
        assert!(ValidationPolicy::Allow.validate(&cmd).is_err());

        cmd.hours = Some(-1e9);
        assert!(ValidationPolicy::Allow.validate(&cmd).is_err());

        cmd.hours = Some(-24.0);
        assert_eq!(ValidationPolicy::Allow.validate(&cmd).unwrap().hours, -24.0);
    }

    #[test]
    fn test_rejects_impossible_counts() {
        for policy in [ValidationPolicy::Reject, ValidationPolicy::Clamp, ValidationPolicy::Allow] {
            let mut cmd = command();
            cmd.placements = Some(i64::MAX);
            assert!(matches!(policy.validate(&cmd), Err(FieldServiceError::InvalidInput(_))));

            cmd.placements = Some(MAX_PLACEMENTS_PER_DAY);
            assert_eq!(policy.validate(&cmd).unwrap().placements, MAX_PLACEMENTS_PER_DAY);

            cmd.videos = Some(i64::MIN);
            assert!(matches!(policy.validate(&cmd), Err(FieldServiceError::InvalidInput(_))));

            cmd.videos = Some(MAX_VIDEOS_PER_DAY + 1);
            assert!(policy.validate(&cmd).is_err());
        }
    }

    #[test]
    fn test_bible_study_ids_are_deduplicated() {
        let mut cmd = command();
        cmd.bible_study_ids = vec![
            "B".to_string(),
            "A".to_string(),
            " B ".to_string(),
            "".to_string(),
        ];
        let activity = ValidationPolicy::Reject.validate(&cmd).unwrap();
        let ids: Vec<&str> = activity.bible_study_ids.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_comments_are_trimmed_and_bounded() {
        let mut cmd = command();
        cmd.comments = Some("   ".to_string());
        assert_eq!(ValidationPolicy::Reject.validate(&cmd).unwrap().comments, None);

        cmd.comments = Some("x".repeat(MAX_COMMENT_LENGTH + 1));
        assert!(ValidationPolicy::Reject.validate(&cmd).is_err());
    }

    #[test]
    fn test_policy_parses_from_config_strings() {
        assert_eq!("Clamp".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::Clamp);
        assert_eq!(ValidationPolicy::Allow.to_string(), "allow");
        assert!("lenient".parse::<ValidationPolicy>().is_err());
    }
}
