//! Domain primitives, services and ports.
//!
//! Purpose: the strongly typed timesheet model (weeks, entries, derived
//! status), authentication primitives, and the services implementing the
//! driving ports. Nothing here depends on actix or Diesel; adapters live in
//! `inbound` and `outbound`.
//!
//! Public API:
//! - `Error`, `ErrorCode`: transport-agnostic failure payload.
//! - `TimesheetService`, `AuthService`: driving port implementations.
//! - `ports`: driving and driven port traits.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod example_data;
pub mod ports;
pub(crate) mod slug;
pub mod timesheet;
pub mod timesheet_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    ACCESS_TOKEN_BYTES, AccessToken, AuthenticatedSession, LoginCredentials, LoginValidationError,
    PasswordDigest, PasswordDigestError, TokenFingerprint,
};
pub use self::auth_service::{AuthService, DEFAULT_TOKEN_TTL};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::example_data::{DEMO_PASSWORD, DemoDataError, DemoDataSeeder, DemoDataset};
pub use self::timesheet::{
    DESCRIPTION_MAX, DateBucket, DayEntries, Description, EntryDraft, EntryId, EntryOptions,
    EntryPatch, Hours, MAX_DAILY_HOURS, PROJECT_NAME_MAX, PROJECT_OPTIONS, ProjectName,
    StatusFilter, TimesheetEntry, TimesheetStatus, TimesheetValidationError, TimesheetWeek,
    TotalHours, UnknownFilterValue, UnknownStatus, WEEKLY_TARGET_HOURS, WORK_TYPE_MAX,
    WORK_TYPE_OPTIONS, WeekDetail, WeekFilter, WeekId, WorkType, YearMonth, derive_status,
};
pub use self::timesheet_service::TimesheetService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, User, UserId, UserValidationError,
};
