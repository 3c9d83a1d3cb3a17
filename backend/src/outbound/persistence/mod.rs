//! PostgreSQL adapters built on Diesel, `diesel-async` and a `bb8` pool.
//!
//! Adapters translate between row structs (`models`) and domain types and
//! hold no business rules. Row structs and the table definitions stay private
//! to this module.
//!
//! ```no_run
//! use backend::outbound::persistence::{
//!     DbPool, DieselTimesheetRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/timesheets";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let weeks = DieselTimesheetRepository::new(pool);
//! # let _ = weeks;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_demo_data_repository;
mod diesel_timesheet_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_demo_data_repository::DieselDemoDataRepository;
pub use diesel_timesheet_repository::DieselTimesheetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
