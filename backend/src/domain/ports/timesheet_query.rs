//! Driving port for reading timesheets.
//!
//! HTTP handlers depend on this trait rather than on the service so tests can
//! substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, TimesheetWeek, WeekDetail, WeekFilter, WeekId};

/// Read-side timesheet use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimesheetQuery: Send + Sync {
    /// Weeks passing `filter`, in store order.
    async fn list_weeks(&self, filter: &WeekFilter) -> Result<Vec<TimesheetWeek>, Error>;

    /// One week with its entries, or `not_found`.
    async fn get_week(&self, id: &WeekId) -> Result<WeekDetail, Error>;
}
