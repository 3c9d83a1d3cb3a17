//! Dashboard filters: status selection and calendar-month buckets.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{TimesheetStatus, TimesheetWeek};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month; `None` unless `month` is within `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one, rolling back over year boundaries.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Whether `date` falls in this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Calendar bucket used to narrow the week list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DateBucket {
    /// Weeks touching the current month.
    #[default]
    ThisMonth,
    /// Weeks touching the previous month.
    LastMonth,
    /// Every week.
    AllTime,
}

impl DateBucket {
    /// Month this bucket selects relative to `today`; `None` for all time.
    pub fn target_month(self, today: NaiveDate) -> Option<YearMonth> {
        match self {
            Self::ThisMonth => Some(YearMonth::of(today)),
            Self::LastMonth => Some(YearMonth::of(today).previous()),
            Self::AllTime => None,
        }
    }

    /// Wire name of the bucket.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::AllTime => "all-time",
        }
    }
}

/// Returned when text does not name a filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownFilterValue {
    /// Which filter was being parsed.
    pub kind: &'static str,
    /// Rejected text.
    pub value: String,
}

impl FromStr for DateBucket {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this-month" => Ok(Self::ThisMonth),
            "last-month" => Ok(Self::LastMonth),
            "all-time" => Ok(Self::AllTime),
            other => Err(UnknownFilterValue {
                kind: "date range",
                value: other.to_owned(),
            }),
        }
    }
}

/// Status selection; `all` disables the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only weeks with this status.
    Only(TimesheetStatus),
}

impl StatusFilter {
    /// Whether a week with `status` passes the filter.
    pub fn matches(self, status: TimesheetStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<TimesheetStatus>()
            .map(Self::Only)
            .map_err(|_| UnknownFilterValue {
                kind: "status",
                value: s.to_owned(),
            })
    }
}

/// Combined status and date filter applied to the week list.
///
/// # Examples
/// ```
/// use backend::domain::{DateBucket, StatusFilter, TimesheetStatus, WeekFilter};
///
/// let filter = WeekFilter::new(StatusFilter::Only(TimesheetStatus::Missing), DateBucket::AllTime);
/// assert_eq!(filter.bucket(), DateBucket::AllTime);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekFilter {
    status: StatusFilter,
    bucket: DateBucket,
}

impl WeekFilter {
    /// Combine a status filter with a date bucket.
    pub const fn new(status: StatusFilter, bucket: DateBucket) -> Self {
        Self { status, bucket }
    }

    /// Status part of the filter.
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Date part of the filter.
    pub const fn bucket(&self) -> DateBucket {
        self.bucket
    }

    /// Whether `week` passes both filters, judged against `today`.
    pub fn matches(&self, week: &TimesheetWeek, today: NaiveDate) -> bool {
        self.status.matches(week.status())
            && self
                .bucket
                .target_month(today)
                .is_none_or(|month| week.touches(month))
    }
}
