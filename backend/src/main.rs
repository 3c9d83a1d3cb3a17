//! Timesheet backend entry point.
//!
//! Loads settings, picks the store adapters, seeds and reconciles the
//! timesheets, then serves the REST API until shutdown.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use backend::server::{ServerSettings, build_http_state, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(&settings, Arc::new(DefaultClock))
        .await
        .wrap_err("failed to prepare timesheet services")?;

    info!(%bind_addr, "starting timesheet backend");
    let server = create_server(health_state, http_state, session, bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    server.await?;
    Ok(())
}
