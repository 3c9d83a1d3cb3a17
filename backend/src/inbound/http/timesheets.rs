//! Timesheet dashboard and entry endpoints.
//!
//! ```text
//! GET /api/v1/timesheets?status=missing&range=this-month&page=1&perPage=5
//! GET /api/v1/timesheets/week-3
//! POST /api/v1/timesheets/week-3/entries {"date":"2026-01-15","projectName":"Mobile App","hours":7.5}
//! PATCH /api/v1/entries/{entryId} {"description":null}
//! DELETE /api/v1/entries/{entryId}
//! GET /api/v1/entry-options
//! ```
//!
//! Every handler requires an authenticated caller.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use pagination::{Paginated, paginate};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DateBucket, Description, EntryDraft, EntryOptions, EntryPatch, Error, Hours, ProjectName,
    StatusFilter, TimesheetEntry, TimesheetWeek, WeekDetail, WeekFilter, WeekId, WorkType,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_entry_id, parse_filter, parse_page_request, require,
};

const DATE: FieldName = FieldName::new("date");
const PROJECT_NAME: FieldName = FieldName::new("projectName");
const HOURS: FieldName = FieldName::new("hours");
const ENTRY_ID: FieldName = FieldName::new("entryId");

/// Query parameters for `GET /api/v1/timesheets`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListWeeksQuery {
    /// `all`, `completed`, `incomplete` or `missing`. Defaults to `all`.
    #[param(example = "missing")]
    pub status: Option<String>,
    /// `this-month`, `last-month` or `all-time`. Defaults to `this-month`.
    #[param(example = "this-month")]
    pub range: Option<String>,
    /// One-based page number. Defaults to 1.
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size between 1 and 100. Defaults to 5.
    #[param(minimum = 1, maximum = 100)]
    pub per_page: Option<u32>,
}

impl ListWeeksQuery {
    fn filter(&self) -> Result<WeekFilter, Error> {
        let status: StatusFilter = parse_filter(self.status.as_deref(), FieldName::new("status"))?;
        let bucket: DateBucket = parse_filter(self.range.as_deref(), FieldName::new("range"))?;
        Ok(WeekFilter::new(status, bucket))
    }
}

/// Body of `POST /api/v1/timesheets/{weekId}/entries`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Day worked, `YYYY-MM-DD`, inside the week.
    #[schema(example = "2026-01-15")]
    pub date: Option<String>,
    /// Project worked on.
    #[schema(example = "Website Redesign")]
    pub project_name: Option<String>,
    /// Kind of work; blank means none.
    #[schema(example = "Development")]
    pub work_type: Option<String>,
    /// Free-text note; blank means none.
    #[schema(example = "Landing page layout")]
    pub description: Option<String>,
    /// Hours between 0 and 24, up to two decimals.
    #[schema(value_type = Option<f64>, example = 7.5)]
    pub hours: Option<serde_json::Number>,
}

impl TryFrom<CreateEntryRequest> for EntryDraft {
    type Error = Error;

    fn try_from(value: CreateEntryRequest) -> Result<Self, Self::Error> {
        let date = parse_date(&require(value.date, DATE)?, DATE)?;
        let project_name = ProjectName::new(require(value.project_name, PROJECT_NAME)?)?;
        let hours = Hours::try_from(require(value.hours, HOURS)?)?;
        Ok(Self {
            date,
            project_name,
            work_type: WorkType::optional(value.work_type.as_deref().unwrap_or_default())?,
            description: Description::optional(value.description.as_deref().unwrap_or_default())?,
            hours,
        })
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `PATCH /api/v1/entries/{entryId}`.
///
/// Absent fields are left unchanged, so `{}` returns the entry as stored.
/// `workType` and `description` are cleared by `null` or a blank string. The
/// owning week cannot be changed.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateEntryRequest {
    /// Replacement day, `YYYY-MM-DD`, inside the entry's week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Replacement project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Replacement work type, or `null` to clear.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub work_type: Option<Option<String>>,
    /// Replacement description, or `null` to clear.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// Replacement hours, up to two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>, example = 6.5)]
    pub hours: Option<serde_json::Number>,
}

impl TryFrom<UpdateEntryRequest> for EntryPatch {
    type Error = Error;

    fn try_from(value: UpdateEntryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value
                .date
                .as_deref()
                .map(|raw| parse_date(raw, DATE))
                .transpose()?,
            project_name: value.project_name.map(ProjectName::new).transpose()?,
            work_type: value
                .work_type
                .map(|raw| WorkType::optional(raw.as_deref().unwrap_or_default()))
                .transpose()?,
            description: value
                .description
                .map(|raw| Description::optional(raw.as_deref().unwrap_or_default()))
                .transpose()?,
            hours: value.hours.map(Hours::try_from).transpose()?,
        })
    }
}

fn request_url(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.uri());
    Url::parse(&raw).map_err(|err| Error::internal(format!("unparseable request URL {raw}: {err}")))
}

/// Weeks matching the filters, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/timesheets",
    params(ListWeeksQuery),
    responses(
        (status = 200, description = "Page of weeks", body = crate::inbound::http::schemas::PaginatedWeeksSchema),
        (status = 400, description = "Unknown filter or page out of range", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 503, description = "Timesheet store unavailable", body = Error)
    ),
    tags = ["timesheets"],
    operation_id = "listWeeks"
)]
#[get("/timesheets")]
pub async fn list_weeks(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<ListWeeksQuery>,
) -> ApiResult<web::Json<Paginated<TimesheetWeek>>> {
    let filter = query.filter()?;
    let page = parse_page_request(query.page, query.per_page)?;
    let weeks = state.timesheets.list_weeks(&filter).await?;
    Ok(web::Json(paginate(weeks, page, &request_url(&req)?)))
}

/// One week with its entries grouped by day.
#[utoipa::path(
    get,
    path = "/api/v1/timesheets/{weekId}",
    params(("weekId" = String, Path, description = "Week identifier", example = "week-3")),
    responses(
        (status = 200, description = "Week detail", body = WeekDetail),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Unknown week", body = Error)
    ),
    tags = ["timesheets"],
    operation_id = "getWeek"
)]
#[get("/timesheets/{weekId}")]
pub async fn get_week(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WeekDetail>> {
    let week_id = WeekId::new(path.into_inner())?;
    let detail = state.timesheets.get_week(&week_id).await?;
    Ok(web::Json(detail))
}

/// Log time against a week. The week's status is recomputed.
#[utoipa::path(
    post,
    path = "/api/v1/timesheets/{weekId}/entries",
    params(("weekId" = String, Path, description = "Week identifier", example = "week-3")),
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = TimesheetEntry),
        (status = 400, description = "Invalid entry", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Unknown week", body = Error)
    ),
    tags = ["entries"],
    operation_id = "createEntry"
)]
#[post("/timesheets/{weekId}/entries")]
pub async fn create_entry(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CreateEntryRequest>,
) -> ApiResult<HttpResponse> {
    let week_id = WeekId::new(path.into_inner())?;
    let draft = EntryDraft::try_from(payload.into_inner())?;
    let entry = state.entries.create_entry(&week_id, draft).await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Change fields of an entry. The owning week's status is recomputed.
#[utoipa::path(
    patch,
    path = "/api/v1/entries/{entryId}",
    params(("entryId" = String, Path, description = "Entry identifier")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Updated entry", body = TimesheetEntry),
        (status = 400, description = "Invalid patch", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Unknown entry", body = Error)
    ),
    tags = ["entries"],
    operation_id = "updateEntry"
)]
#[patch("/entries/{entryId}")]
pub async fn update_entry(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEntryRequest>,
) -> ApiResult<web::Json<TimesheetEntry>> {
    let entry_id = parse_entry_id(&path, ENTRY_ID)?;
    let patch = EntryPatch::try_from(payload.into_inner())?;
    let entry = state.entries.update_entry(&entry_id, patch).await?;
    Ok(web::Json(entry))
}

/// Remove an entry. The owning week's status is recomputed.
#[utoipa::path(
    delete,
    path = "/api/v1/entries/{entryId}",
    params(("entryId" = String, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Malformed entry id", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Unknown entry", body = Error)
    ),
    tags = ["entries"],
    operation_id = "deleteEntry"
)]
#[delete("/entries/{entryId}")]
pub async fn delete_entry(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let entry_id = parse_entry_id(&path, ENTRY_ID)?;
    state.entries.delete_entry(&entry_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Suggested project names and work types for the entry form.
#[utoipa::path(
    get,
    path = "/api/v1/entry-options",
    responses(
        (status = 200, description = "Form options", body = EntryOptions),
        (status = 401, description = "Authentication required", body = Error)
    ),
    tags = ["entries"],
    operation_id = "entryOptions"
)]
#[get("/entry-options")]
pub async fn entry_options(_caller: AuthenticatedUser) -> web::Json<EntryOptions> {
    web::Json(EntryOptions::default())
}

#[cfg(test)]
#[path = "timesheets_tests.rs"]
mod tests;
