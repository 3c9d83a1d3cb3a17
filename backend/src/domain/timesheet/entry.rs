//! Time entries: a day's work against a project within a week.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Hours, TimesheetValidationError, WeekId};

/// Maximum length of a project name.
pub const PROJECT_NAME_MAX: usize = 100;
/// Maximum length of a work type label.
pub const WORK_TYPE_MAX: usize = 100;
/// Maximum length of an entry description.
pub const DESCRIPTION_MAX: usize = 500;

/// Identifier of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

fn bounded_text(
    raw: &str,
    max: usize,
    too_long: TimesheetValidationError,
) -> Result<String, TimesheetValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Name of the project time was logged against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a project name: non-blank, at most [`PROJECT_NAME_MAX`] characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TimesheetValidationError> {
        let value = bounded_text(
            raw.as_ref(),
            PROJECT_NAME_MAX,
            TimesheetValidationError::ProjectNameTooLong {
                max: PROJECT_NAME_MAX,
            },
        )?;
        if value.is_empty() {
            return Err(TimesheetValidationError::EmptyProjectName);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = TimesheetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kind of work performed, for example `Development`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkType(String);

impl WorkType {
    /// Validate a work type. Blank input yields `None`.
    pub fn optional(raw: &str) -> Result<Option<Self>, TimesheetValidationError> {
        let value = bounded_text(
            raw,
            WORK_TYPE_MAX,
            TimesheetValidationError::WorkTypeTooLong { max: WORK_TYPE_MAX },
        )?;
        Ok((!value.is_empty()).then_some(Self(value)))
    }
}

impl AsRef<str> for WorkType {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<WorkType> for String {
    fn from(value: WorkType) -> Self {
        value.0
    }
}

/// Free-text note on an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Validate a description. Blank input yields `None`.
    pub fn optional(raw: &str) -> Result<Option<Self>, TimesheetValidationError> {
        let value = bounded_text(
            raw,
            DESCRIPTION_MAX,
            TimesheetValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            },
        )?;
        Ok((!value.is_empty()).then_some(Self(value)))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Validated values for a new entry. The week comes from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Day the work happened.
    pub date: NaiveDate,
    /// Project worked on.
    pub project_name: ProjectName,
    /// Kind of work.
    pub work_type: Option<WorkType>,
    /// Free-text note.
    pub description: Option<Description>,
    /// Hours logged.
    pub hours: Hours,
}

/// Partial update of an entry. `None` leaves a field unchanged.
///
/// For the optional text fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// Replacement day.
    pub date: Option<NaiveDate>,
    /// Replacement project.
    pub project_name: Option<ProjectName>,
    /// Replacement or cleared work type.
    pub work_type: Option<Option<WorkType>>,
    /// Replacement or cleared description.
    pub description: Option<Option<Description>>,
    /// Replacement hours.
    pub hours: Option<Hours>,
}

impl EntryPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A stored time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    #[schema(value_type = String, format = Uuid)]
    id: EntryId,
    #[schema(value_type = String, example = "week-1")]
    week_id: WeekId,
    date: NaiveDate,
    #[schema(value_type = String, example = "Website Redesign")]
    project_name: ProjectName,
    #[schema(value_type = Option<String>, example = "Development")]
    #[serde(skip_serializing_if = "Option::is_none")]
    work_type: Option<WorkType>,
    #[schema(value_type = Option<String>, example = "Frontend implementation")]
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Description>,
    #[schema(value_type = f64, minimum = 0.0, maximum = 24.0, example = 7.5)]
    hours: Hours,
}

impl TimesheetEntry {
    /// Materialise a draft as an entry of `week_id`.
    pub fn from_draft(id: EntryId, week_id: WeekId, draft: EntryDraft) -> Self {
        let EntryDraft {
            date,
            project_name,
            work_type,
            description,
            hours,
        } = draft;
        Self {
            id,
            week_id,
            date,
            project_name,
            work_type,
            description,
            hours,
        }
    }

    /// Copy of this entry with `patch` merged in.
    pub fn patched(&self, patch: EntryPatch) -> Self {
        let EntryPatch {
            date,
            project_name,
            work_type,
            description,
            hours,
        } = patch;
        Self {
            id: self.id,
            week_id: self.week_id.clone(),
            date: date.unwrap_or(self.date),
            project_name: project_name.unwrap_or_else(|| self.project_name.clone()),
            work_type: work_type.unwrap_or_else(|| self.work_type.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            hours: hours.unwrap_or(self.hours),
        }
    }

    /// Entry identifier.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Week the entry belongs to.
    pub fn week_id(&self) -> &WeekId {
        &self.week_id
    }

    /// Day the work happened.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Project worked on.
    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    /// Kind of work, if recorded.
    pub fn work_type(&self) -> Option<&WorkType> {
        self.work_type.as_ref()
    }

    /// Free-text note, if recorded.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Hours logged.
    pub fn hours(&self) -> Hours {
        self.hours
    }
}
