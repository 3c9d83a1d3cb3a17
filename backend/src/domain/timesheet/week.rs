//! Timesheet weeks: the reporting periods entries are logged against.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{TimesheetStatus, TimesheetValidationError, YearMonth};
use crate::domain::slug::is_valid_slug;

/// Slug identifying a week, for example `week-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekId(String);

impl WeekId {
    /// Validate a week identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, TimesheetValidationError> {
        let id = id.into();
        if !is_valid_slug(&id) {
            return Err(TimesheetValidationError::InvalidWeekId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for WeekId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<WeekId> for String {
    fn from(value: WeekId) -> Self {
        value.0
    }
}

impl TryFrom<String> for WeekId {
    type Error = TimesheetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A reporting week.
///
/// ## Invariants
/// - `start_date <= end_date`.
/// - `week_number` is within `1..=53`.
/// - `status` reflects the week's entries once the service has refreshed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetWeek {
    #[schema(value_type = String, example = "week-1")]
    id: WeekId,
    #[schema(example = 1)]
    week_number: u8,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: TimesheetStatus,
}

impl TimesheetWeek {
    /// Build a week with no entries, so its status starts as missing.
    pub fn new(
        id: WeekId,
        week_number: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TimesheetValidationError> {
        if !(1..=53).contains(&week_number) {
            return Err(TimesheetValidationError::InvalidWeekNumber {
                actual: week_number,
            });
        }
        if end_date < start_date {
            return Err(TimesheetValidationError::InvertedWeekRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id,
            week_number,
            start_date,
            end_date,
            status: TimesheetStatus::Missing,
        })
    }

    /// Replace the status.
    pub fn with_status(mut self, status: TimesheetStatus) -> Self {
        self.status = status;
        self
    }

    /// Week identifier.
    pub fn id(&self) -> &WeekId {
        &self.id
    }

    /// Week number within its year.
    pub fn week_number(&self) -> u8 {
        self.week_number
    }

    /// First day of the week.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the week, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Current status.
    pub fn status(&self) -> TimesheetStatus {
        self.status
    }

    /// Whether `date` falls inside the week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.end_date).contains(&date)
    }

    /// Reject dates outside the week.
    pub fn ensure_contains(&self, date: NaiveDate) -> Result<(), TimesheetValidationError> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(TimesheetValidationError::DateOutsideWeek {
                date,
                start: self.start_date,
                end: self.end_date,
            })
        }
    }

    /// Every day of the week in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take_while(|day| *day <= self.end_date)
    }

    /// Whether the week starts or ends in `month`.
    pub fn touches(&self, month: YearMonth) -> bool {
        month.contains(self.start_date) || month.contains(self.end_date)
    }
}
