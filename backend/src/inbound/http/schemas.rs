//! OpenAPI schemas for types defined outside this crate.
//!
//! The `pagination` crate stays free of utoipa, so its envelope is described
//! here with mirror structs that exist only for documentation.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::TimesheetWeek;

/// OpenAPI schema for [`pagination::PaginationLinks`].
#[derive(Serialize, ToSchema)]
#[schema(as = PaginationLinks)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PaginationLinksSchema {
    /// Link to the page that was served.
    #[serde(rename = "self")]
    #[schema(example = "http://localhost:8080/api/v1/timesheets?page=1&perPage=5")]
    current: String,
    /// Link to the following page, omitted on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "http://localhost:8080/api/v1/timesheets?page=2&perPage=5")]
    next: Option<String>,
    /// Link to the preceding page, omitted on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<String>,
}

/// OpenAPI schema for `Paginated<TimesheetWeek>`.
#[derive(Serialize, ToSchema)]
#[schema(as = PaginatedWeeks)]
#[serde(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PaginatedWeeksSchema {
    /// Weeks on this page.
    data: Vec<TimesheetWeek>,
    /// One-based page number.
    #[schema(example = 1)]
    page: u32,
    /// Page size.
    #[schema(example = 5)]
    per_page: u32,
    /// Weeks matching the filters across all pages.
    #[schema(example = 6)]
    total_items: u64,
    /// Number of pages at this page size.
    #[schema(example = 2)]
    total_pages: u32,
    /// Navigation links.
    links: PaginationLinksSchema,
}
