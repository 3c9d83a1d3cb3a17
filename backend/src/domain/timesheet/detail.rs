//! Week detail view: the week, its entries, and per-day grouping.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::hours::CENTIS_PER_HOUR;
use super::{TimesheetEntry, TimesheetWeek, TotalHours, WEEKLY_TARGET_HOURS};

/// Entries logged on one day of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayEntries {
    date: NaiveDate,
    #[schema(value_type = f64, example = 7.5)]
    total_hours: TotalHours,
    entries: Vec<TimesheetEntry>,
}

impl DayEntries {
    /// Calendar day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hours logged on the day.
    pub fn total_hours(&self) -> TotalHours {
        self.total_hours
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[TimesheetEntry] {
        self.entries.as_slice()
    }
}

/// A week with its entries and progress towards the weekly target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekDetail {
    week: TimesheetWeek,
    entries: Vec<TimesheetEntry>,
    #[schema(value_type = f64, example = 19.5)]
    total_hours: TotalHours,
    #[schema(example = 40)]
    target_hours: u32,
    #[schema(example = 50)]
    progress_percent: u8,
    days: Vec<DayEntries>,
}

impl WeekDetail {
    /// Assemble the view. Entries dated outside the week appear in
    /// `entries` and the total but in no day group.
    pub fn new(week: TimesheetWeek, entries: Vec<TimesheetEntry>) -> Self {
        let total_hours: TotalHours = entries.iter().map(TimesheetEntry::hours).sum();
        let days = week
            .days()
            .map(|date| {
                let day: Vec<TimesheetEntry> = entries
                    .iter()
                    .filter(|entry| entry.date() == date)
                    .cloned()
                    .collect();
                DayEntries {
                    date,
                    total_hours: day.iter().map(TimesheetEntry::hours).sum(),
                    entries: day,
                }
            })
            .collect();
        Self {
            week,
            entries,
            total_hours,
            target_hours: WEEKLY_TARGET_HOURS,
            progress_percent: progress_percent(total_hours),
            days,
        }
    }

    /// The week itself.
    pub fn week(&self) -> &TimesheetWeek {
        &self.week
    }

    /// Every entry of the week.
    pub fn entries(&self) -> &[TimesheetEntry] {
        self.entries.as_slice()
    }

    /// Sum of all entry hours.
    pub fn total_hours(&self) -> TotalHours {
        self.total_hours
    }

    /// Progress towards the weekly target, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// One group per day of the week, in date order.
    pub fn days(&self) -> &[DayEntries] {
        self.days.as_slice()
    }
}

fn progress_percent(total: TotalHours) -> u8 {
    let target = WEEKLY_TARGET_HOURS * CENTIS_PER_HOUR;
    let percent = total.centis().saturating_mul(100).div_euclid(target);
    u8::try_from(percent.min(100)).unwrap_or(100)
}
