//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerSettings, SettingsError};
pub use state_builders::{StartupError, build_http_state};

use std::net::SocketAddr;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::timesheets::{
    create_entry, delete_entry, entry_options, get_week, list_weeks, update_entry,
};
use crate::inbound::http::users::{current_user, login, logout};
use crate::middleware::Trace;

const SESSION_COOKIE: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

/// Everything one Actix worker needs to build its [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Health state shared with the server lifecycle.
    pub health_state: web::Data<HealthState>,
    /// Driving ports used by the handlers.
    pub http_state: web::Data<HttpState>,
    /// Cookie key and attributes.
    pub session: SessionSettings,
}

/// Build the application: `/api/v1` routes behind the session middleware,
/// health checks at the root, and Swagger UI at `/docs` in debug builds.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), session.key)
        .cookie_name(SESSION_COOKIE.into())
        .cookie_path("/".into())
        .cookie_secure(session.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(session.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS),
        ))
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(list_weeks)
        .service(get_week)
        .service(create_entry)
        .service(update_entry)
        .service(delete_entry)
        .service(entry_options);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark the health checks ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    session: SessionSettings,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        session,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
