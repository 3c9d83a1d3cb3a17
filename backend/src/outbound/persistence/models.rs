//! Row structs for the Diesel adapters and their conversion to domain types.
//!
//! Stored rows are re-validated on the way out; a row the domain rejects is
//! reported as a query failure rather than silently repaired.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{timesheet_entries, timesheet_weeks, users};
use crate::domain::ports::UserCredentials;
use crate::domain::{
    Description, EntryDraft, EntryId, Hours, PasswordDigest, ProjectName, TimesheetEntry,
    TimesheetStatus, TimesheetWeek, UnknownStatus, User, WeekId, WorkType,
};

/// Why a stored row could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {table} row {id} is invalid: {reason}")]
pub(crate) struct InvalidRow {
    table: &'static str,
    id: String,
    reason: String,
}

impl InvalidRow {
    fn new(table: &'static str, id: impl ToString, reason: impl ToString) -> Self {
        Self {
            table,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub password_digest: String,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, InvalidRow> {
        User::try_from_strings(
            self.id.to_string(),
            self.display_name,
            &self.email,
            self.avatar_url.as_deref(),
        )
        .map_err(|err| InvalidRow::new("users", self.id, err))
    }

    pub(crate) fn into_credentials(self) -> Result<UserCredentials, InvalidRow> {
        let password = PasswordDigest::parse(&self.password_digest)
            .map_err(|err| InvalidRow::new("users", self.id, err))?;
        Ok(UserCredentials {
            user: self.into_user()?,
            password,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub avatar_url: Option<&'a str>,
    pub password_digest: String,
}

impl<'a> From<&'a UserCredentials> for NewUserRow<'a> {
    fn from(credentials: &'a UserCredentials) -> Self {
        let user = &credentials.user;
        Self {
            id: *user.id().as_uuid(),
            display_name: user.name().as_ref(),
            email: user.email().as_ref(),
            avatar_url: user.avatar_url().map(url::Url::as_str),
            password_digest: credentials.password.encode(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = timesheet_weeks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WeekRow {
    pub id: String,
    pub week_number: i16,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl TryFrom<WeekRow> for TimesheetWeek {
    type Error = InvalidRow;

    fn try_from(row: WeekRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidRow::new("timesheet_weeks", &row.id, reason);
        let status: TimesheetStatus = row
            .status
            .parse()
            .map_err(|err: UnknownStatus| invalid(err.to_string()))?;
        let number = u8::try_from(row.week_number)
            .map_err(|_| invalid(format!("week number {}", row.week_number)))?;
        let id = WeekId::new(row.id.clone()).map_err(|err| invalid(err.to_string()))?;
        let week = TimesheetWeek::new(id, number, row.start_date, row.end_date)
            .map_err(|err| invalid(err.to_string()))?;
        Ok(week.with_status(status))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = timesheet_weeks)]
pub(crate) struct NewWeekRow<'a> {
    pub id: &'a str,
    pub week_number: i16,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: &'static str,
}

impl<'a> From<&'a TimesheetWeek> for NewWeekRow<'a> {
    fn from(week: &'a TimesheetWeek) -> Self {
        Self {
            id: week.id().as_ref(),
            week_number: i16::from(week.week_number()),
            start_date: week.start_date(),
            end_date: week.end_date(),
            status: week.status().as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = timesheet_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub id: Uuid,
    pub week_id: String,
    pub entry_date: NaiveDate,
    pub project_name: String,
    pub work_type: Option<String>,
    pub description: Option<String>,
    pub hours_centis: i32,
}

impl TryFrom<EntryRow> for TimesheetEntry {
    type Error = InvalidRow;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidRow::new("timesheet_entries", row.id, reason);
        let draft = EntryDraft {
            date: row.entry_date,
            project_name: ProjectName::new(&row.project_name)
                .map_err(|err| invalid(err.to_string()))?,
            work_type: WorkType::optional(row.work_type.as_deref().unwrap_or_default())
                .map_err(|err| invalid(err.to_string()))?,
            description: Description::optional(row.description.as_deref().unwrap_or_default())
                .map_err(|err| invalid(err.to_string()))?,
            hours: Hours::from_centis(i64::from(row.hours_centis))
                .map_err(|err| invalid(err.to_string()))?,
        };
        let week_id = WeekId::new(row.week_id.clone()).map_err(|err| invalid(err.to_string()))?;
        Ok(TimesheetEntry::from_draft(
            EntryId::from_uuid(row.id),
            week_id,
            draft,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = timesheet_entries)]
pub(crate) struct NewEntryRow<'a> {
    pub id: Uuid,
    pub week_id: &'a str,
    pub entry_date: NaiveDate,
    pub project_name: &'a str,
    pub work_type: Option<&'a str>,
    pub description: Option<&'a str>,
    pub hours_centis: i32,
}

impl<'a> From<&'a TimesheetEntry> for NewEntryRow<'a> {
    fn from(entry: &'a TimesheetEntry) -> Self {
        Self {
            id: *entry.id().as_uuid(),
            week_id: entry.week_id().as_ref(),
            entry_date: entry.date(),
            project_name: entry.project_name().as_ref(),
            work_type: entry.work_type().map(AsRef::as_ref),
            description: entry.description().map(AsRef::as_ref),
            hours_centis: i32::from(entry.hours().centis()),
        }
    }
}

/// Full replacement of an entry's mutable columns. `None` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = timesheet_entries)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EntryChangeset<'a> {
    pub entry_date: NaiveDate,
    pub project_name: &'a str,
    pub work_type: Option<&'a str>,
    pub description: Option<&'a str>,
    pub hours_centis: i32,
}

impl<'a> From<&'a TimesheetEntry> for EntryChangeset<'a> {
    fn from(entry: &'a TimesheetEntry) -> Self {
        Self {
            entry_date: entry.date(),
            project_name: entry.project_name().as_ref(),
            work_type: entry.work_type().map(AsRef::as_ref),
            description: entry.description().map(AsRef::as_ref),
            hours_centis: i32::from(entry.hours().centis()),
        }
    }
}
