//! Timesheet backend library.
//!
//! The `domain` module owns the timesheet model and services; `inbound`
//! exposes them over HTTP and `outbound` stores them in memory or in
//! PostgreSQL. `server` wires the adapters together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
