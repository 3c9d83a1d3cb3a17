//! Timesheet domain: weeks, per-day entries, derived status and filters.
//!
//! A week's status is never stored independently of its entries; it is
//! recomputed with [`derive_status`] whenever entries change.

mod detail;
mod entry;
mod filter;
mod hours;
mod options;
mod status;
mod week;

pub use detail::{DayEntries, WeekDetail};
pub use entry::{
    DESCRIPTION_MAX, Description, EntryDraft, EntryId, EntryPatch, PROJECT_NAME_MAX, ProjectName,
    TimesheetEntry, WORK_TYPE_MAX, WorkType,
};
pub use filter::{DateBucket, StatusFilter, UnknownFilterValue, WeekFilter, YearMonth};
pub use hours::{Hours, MAX_DAILY_HOURS, TotalHours};
pub use options::{EntryOptions, PROJECT_OPTIONS, WORK_TYPE_OPTIONS};
pub use status::{TimesheetStatus, UnknownStatus, WEEKLY_TARGET_HOURS, derive_status};
pub use week::{TimesheetWeek, WeekId};

use chrono::NaiveDate;

/// Validation failures for timesheet values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimesheetValidationError {
    /// Hours fall outside `0..=24`.
    #[error("hours must be between 0 and {max}, got {actual}")]
    HoursOutOfRange {
        /// Largest accepted value.
        max: u8,
        /// Rejected value as given.
        actual: String,
    },
    /// Hours carry more than two decimal places.
    #[error("hours allow at most two decimal places, got {actual}")]
    HoursTooPrecise {
        /// Rejected value as given.
        actual: String,
    },
    /// Hours are not a plain decimal number.
    #[error("hours must be a decimal number, got {actual}")]
    InvalidHours {
        /// Rejected value as given.
        actual: String,
    },
    /// The project name was blank.
    #[error("project name must not be empty")]
    EmptyProjectName,
    /// The project name exceeds [`PROJECT_NAME_MAX`] characters.
    #[error("project name must be at most {max} characters")]
    ProjectNameTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The work type exceeds [`WORK_TYPE_MAX`] characters.
    #[error("work type must be at most {max} characters")]
    WorkTypeTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The description exceeds [`DESCRIPTION_MAX`] characters.
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The week identifier is not a slug.
    #[error("week id must contain only lowercase letters, digits, or hyphens")]
    InvalidWeekId,
    /// The week number is outside `1..=53`.
    #[error("week number must be between 1 and 53, got {actual}")]
    InvalidWeekNumber {
        /// Rejected value.
        actual: u8,
    },
    /// The week ends before it starts.
    #[error("week must not end ({end}) before it starts ({start})")]
    InvertedWeekRange {
        /// First day of the week.
        start: NaiveDate,
        /// Last day of the week.
        end: NaiveDate,
    },
    /// An entry date lies outside its week.
    #[error("date {date} is outside the week {start} to {end}")]
    DateOutsideWeek {
        /// Rejected date.
        date: NaiveDate,
        /// First day of the week.
        start: NaiveDate,
        /// Last day of the week.
        end: NaiveDate,
    },
}

impl TimesheetValidationError {
    /// Name of the request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::HoursOutOfRange { .. }
            | Self::HoursTooPrecise { .. }
            | Self::InvalidHours { .. } => "hours",
            Self::EmptyProjectName | Self::ProjectNameTooLong { .. } => "projectName",
            Self::WorkTypeTooLong { .. } => "workType",
            Self::DescriptionTooLong { .. } => "description",
            Self::InvalidWeekId => "weekId",
            Self::InvalidWeekNumber { .. } => "weekNumber",
            Self::InvertedWeekRange { .. } => "endDate",
            Self::DateOutsideWeek { .. } => "date",
        }
    }

    /// Stable machine-readable reason for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HoursOutOfRange { .. } => "hours_out_of_range",
            Self::HoursTooPrecise { .. } => "hours_too_precise",
            Self::InvalidHours { .. } => "invalid_hours",
            Self::EmptyProjectName => "empty_project_name",
            Self::ProjectNameTooLong { .. } => "project_name_too_long",
            Self::WorkTypeTooLong { .. } => "work_type_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::InvalidWeekId => "invalid_week_id",
            Self::InvalidWeekNumber { .. } => "invalid_week_number",
            Self::InvertedWeekRange { .. } => "inverted_week_range",
            Self::DateOutsideWeek { .. } => "date_outside_week",
        }
    }
}

impl From<TimesheetValidationError> for crate::domain::Error {
    fn from(value: TimesheetValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(serde_json::json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}
