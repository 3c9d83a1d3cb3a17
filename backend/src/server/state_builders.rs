//! Adapter selection and startup work run before the server accepts traffic.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AccessTokenRepository, DemoDataRepository, SeedingResult, TimesheetRepository, UserRepository,
};
use crate::domain::{AuthService, DemoDataError, DemoDataSeeder, Error, TimesheetService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccessTokenRepository, InMemoryStore};
use crate::outbound::persistence::{
    DbPool, DieselDemoDataRepository, DieselTimesheetRepository, DieselUserRepository,
    MigrationError, PoolConfig, PoolError, run_migrations,
};

use super::config::{ServerSettings, SettingsError};

/// Failures while preparing the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings could not be interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Schema migrations failed.
    #[error("database migration failed: {0}")]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),
    /// Demo data could not be built or stored.
    #[error("demo data seeding failed: {0}")]
    DemoData(#[from] DemoDataError),
    /// Stored week statuses could not be reconciled.
    #[error("status reconciliation failed: {0}")]
    Reconcile(#[source] Error),
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Build the HTTP state over the adapters selected by `settings`.
///
/// Without a database URL every port is served from process memory. With
/// one, migrations run first and the timesheet and user ports use
/// PostgreSQL. Access tokens are always kept in memory.
pub async fn build_http_state(
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StartupError> {
    let tokens = Arc::new(InMemoryAccessTokenRepository::new().with_latency(settings.latency()));
    match settings.database_url() {
        None => {
            info!(backend = "memory", "selecting timesheet store");
            let store = Arc::new(InMemoryStore::new().with_latency(settings.latency()));
            assemble(
                Adapters {
                    timesheets: store.clone(),
                    users: store.clone(),
                    demo: store,
                    tokens,
                },
                settings,
                clock,
            )
            .await
        }
        Some(url) => {
            info!(backend = "postgres", "selecting timesheet store");
            let applied = run_migrations(url).await?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(PoolConfig::new(url)).await?;
            assemble(
                Adapters {
                    timesheets: Arc::new(DieselTimesheetRepository::new(pool.clone())),
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    demo: Arc::new(DieselDemoDataRepository::new(pool)),
                    tokens,
                },
                settings,
                clock,
            )
            .await
        }
    }
}

struct Adapters<T, U, D, K> {
    timesheets: Arc<T>,
    users: Arc<U>,
    demo: Arc<D>,
    tokens: Arc<K>,
}

async fn assemble<T, U, D, K>(
    adapters: Adapters<T, U, D, K>,
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StartupError>
where
    T: TimesheetRepository + 'static,
    U: UserRepository + 'static,
    D: DemoDataRepository + 'static,
    K: AccessTokenRepository + 'static,
{
    let Adapters {
        timesheets,
        users,
        demo,
        tokens,
    } = adapters;
    let token_ttl = settings.token_ttl()?;

    if settings.seed_demo_data() {
        match DemoDataSeeder::new(demo).seed().await? {
            SeedingResult::Applied => info!("demo data seeded"),
            SeedingResult::AlreadySeeded => info!("demo data already present"),
        }
    }

    let service = Arc::new(TimesheetService::new(timesheets, clock.clone()));
    let changed = service
        .reconcile_statuses()
        .await
        .map_err(StartupError::Reconcile)?;
    info!(changed, "stored week statuses checked");

    let login = AuthService::new(users, tokens, clock).with_token_ttl(token_ttl);
    Ok(HttpState::new(Arc::new(login), service.clone(), service))
}
