//! Week completion status and the rule deriving it from logged hours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TotalHours;
use super::hours::CENTIS_PER_HOUR;

/// Hours a week needs to count as completed.
pub const WEEKLY_TARGET_HOURS: u32 = 40;

/// Completion status of a timesheet week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    /// At least [`WEEKLY_TARGET_HOURS`] logged.
    Completed,
    /// Some hours logged, fewer than the target.
    Incomplete,
    /// Nothing logged.
    Missing,
}

impl TimesheetStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timesheet status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for TimesheetStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "incomplete" => Ok(Self::Incomplete),
            "missing" => Ok(Self::Missing),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Derive a week's status from the total hours of its entries.
///
/// # Examples
/// ```
/// use backend::domain::{TimesheetStatus, TotalHours, derive_status};
///
/// assert_eq!(derive_status(TotalHours::new(40)), TimesheetStatus::Completed);
/// assert_eq!(derive_status(TotalHours::from_centis(3950)), TimesheetStatus::Incomplete);
/// assert_eq!(derive_status(TotalHours::new(8)), TimesheetStatus::Incomplete);
/// assert_eq!(derive_status(TotalHours::new(0)), TimesheetStatus::Missing);
/// ```
pub const fn derive_status(total: TotalHours) -> TimesheetStatus {
    match total.centis() {
        0 => TimesheetStatus::Missing,
        centis if centis >= WEEKLY_TARGET_HOURS * CENTIS_PER_HOUR => TimesheetStatus::Completed,
        _ => TimesheetStatus::Incomplete,
    }
}
