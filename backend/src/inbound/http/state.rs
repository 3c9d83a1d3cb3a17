//! Port bundle shared by the HTTP handlers.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TimesheetCommand, TimesheetQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login, token resolution and logout.
    pub login: Arc<dyn LoginService>,
    /// Week listing and detail.
    pub timesheets: Arc<dyn TimesheetQuery>,
    /// Entry mutations.
    pub entries: Arc<dyn TimesheetCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{LoginService, TimesheetCommand, TimesheetQuery};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// fn build(
    ///     login: Arc<dyn LoginService>,
    ///     timesheets: Arc<dyn TimesheetQuery>,
    ///     entries: Arc<dyn TimesheetCommand>,
    /// ) -> HttpState {
    ///     HttpState::new(login, timesheets, entries)
    /// }
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        timesheets: Arc<dyn TimesheetQuery>,
        entries: Arc<dyn TimesheetCommand>,
    ) -> Self {
        Self {
            login,
            timesheets,
            entries,
        }
    }
}
