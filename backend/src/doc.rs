//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response
//! schemas, and two security schemes: the `session` cookie set by
//! `POST /api/v1/login` and a bearer access token. Swagger UI serves the
//! document in debug builds and `openapi-dump` prints it for tooling.

use crate::domain::{
    DayEntries, EntryOptions, Error, ErrorCode, TimesheetEntry, TimesheetStatus, TimesheetWeek,
    User, WeekDetail,
};
use crate::inbound::http::schemas::{PaginatedWeeksSchema, PaginationLinksSchema};
use crate::inbound::http::timesheets::{CreateEntryRequest, UpdateEntryRequest};
use crate::inbound::http::users::{LoginRequest, LoginResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the cookie and bearer security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Access token returned by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Timesheet backend API",
        description = "Weekly timesheets, time entries and token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = []), ("BearerToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::timesheets::list_weeks,
        crate::inbound::http::timesheets::get_week,
        crate::inbound::http::timesheets::create_entry,
        crate::inbound::http::timesheets::update_entry,
        crate::inbound::http::timesheets::delete_entry,
        crate::inbound::http::timesheets::entry_options,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        LoginRequest,
        LoginResponse,
        TimesheetStatus,
        TimesheetWeek,
        TimesheetEntry,
        DayEntries,
        WeekDetail,
        EntryOptions,
        CreateEntryRequest,
        UpdateEntryRequest,
        PaginatedWeeksSchema,
        PaginationLinksSchema,
    )),
    tags(
        (name = "auth", description = "Login, logout and the current user"),
        (name = "timesheets", description = "Weekly timesheet dashboard and detail"),
        (name = "entries", description = "Time entries and form options"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::{fixture, rstest};
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    #[fixture]
    fn doc() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }

    fn schema<'a>(doc: &'a utoipa::openapi::OpenApi, name: &str) -> &'a RefOr<Schema> {
        doc.components
            .as_ref()
            .expect("components")
            .schemas
            .get(name)
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/logout")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/timesheets")]
    #[case("/api/v1/timesheets/{weekId}")]
    #[case("/api/v1/timesheets/{weekId}/entries")]
    #[case("/api/v1/entries/{entryId}")]
    #[case("/api/v1/entry-options")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(doc: utoipa::openapi::OpenApi, #[case] path: &str) {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("User", "avatarUrl")]
    #[case("TimesheetWeek", "weekNumber")]
    #[case("WeekDetail", "totalHours")]
    #[case("PaginatedWeeks", "totalPages")]
    fn schemas_use_wire_field_names(
        doc: utoipa::openapi::OpenApi,
        #[case] name: &str,
        #[case] field: &str,
    ) {
        assert_object_schema_has_field(schema(&doc, name), field);
    }

    #[rstest]
    fn both_security_schemes_are_registered(doc: utoipa::openapi::OpenApi) {
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
