//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`TimesheetQuery`, `TimesheetCommand`, `LoginService`) are what the
//! inbound HTTP adapter calls.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_repository;
mod demo_data_repository;
mod login_service;
mod timesheet_command;
mod timesheet_query;
mod timesheet_repository;
mod user_repository;

#[cfg(test)]
pub use access_token_repository::MockAccessTokenRepository;
pub use access_token_repository::{
    AccessTokenRecord, AccessTokenRepository, AccessTokenRepositoryError,
};
#[cfg(test)]
pub use demo_data_repository::MockDemoDataRepository;
pub use demo_data_repository::{DemoDataRepository, DemoDataRepositoryError, SeedingResult};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use timesheet_command::MockTimesheetCommand;
pub use timesheet_command::TimesheetCommand;
#[cfg(test)]
pub use timesheet_query::MockTimesheetQuery;
pub use timesheet_query::TimesheetQuery;
#[cfg(test)]
pub use timesheet_repository::MockTimesheetRepository;
pub use timesheet_repository::{RemovedEntry, TimesheetRepository, TimesheetRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserCredentials, UserPersistenceError, UserRepository};
