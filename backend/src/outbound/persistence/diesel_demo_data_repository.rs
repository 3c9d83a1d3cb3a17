//! PostgreSQL-backed demo data seeding.
//!
//! Users, weeks and entries are written in one transaction. A database that
//! already holds any week is treated as seeded and left alone.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::DemoDataset;
use crate::domain::ports::{DemoDataRepository, DemoDataRepositoryError, SeedingResult};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewEntryRow, NewUserRow, NewWeekRow};
use super::pool::DbPool;
use super::schema::{timesheet_entries, timesheet_weeks, users};

/// Diesel adapter for [`DemoDataRepository`].
#[derive(Clone)]
pub struct DieselDemoDataRepository {
    pool: DbPool,
}

impl DieselDemoDataRepository {
    /// Create a seeding adapter over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DemoDataRepository for DieselDemoDataRepository {
    async fn seed_demo_data(
        &self,
        dataset: &DemoDataset,
    ) -> Result<SeedingResult, DemoDataRepositoryError> {
        let user_rows: Vec<NewUserRow<'_>> = dataset.users.iter().map(NewUserRow::from).collect();
        let week_rows: Vec<NewWeekRow<'_>> = dataset.weeks.iter().map(NewWeekRow::from).collect();
        let entry_rows: Vec<NewEntryRow<'_>> =
            dataset.entries.iter().map(NewEntryRow::from).collect();

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DemoDataRepositoryError::connection))?;

        conn.transaction(|conn| {
            async move {
                let existing: i64 = timesheet_weeks::table.count().get_result(conn).await?;
                if existing > 0 {
                    debug!(existing, "timesheet weeks present; skipping demo data");
                    return Ok(SeedingResult::AlreadySeeded);
                }

                diesel::insert_into(users::table)
                    .values(&user_rows)
                    .on_conflict(users::id)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                diesel::insert_into(timesheet_weeks::table)
                    .values(&week_rows)
                    .execute(conn)
                    .await?;
                diesel::insert_into(timesheet_entries::table)
                    .values(&entry_rows)
                    .execute(conn)
                    .await?;
                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| {
            map_diesel_error(
                err,
                DemoDataRepositoryError::query,
                DemoDataRepositoryError::connection,
            )
        })
    }
}
